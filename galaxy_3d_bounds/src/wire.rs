/// Binary persistence of bounding volumes.
///
/// Each shape writes its fields in declaration order as host-order `f32`
/// (the cone's spherical flag as one byte), with no length prefix or version
/// tag. Cached data is never written: extended boxes re-derive their radii
/// and cones start with every derived group dirty after a read.
///
/// | Shape      | Layout                                                   |
/// |------------|----------------------------------------------------------|
/// | Plane      | normal (3f) d (f)                                        |
/// | Sphere     | center (3f) radius (f)                                   |
/// | AABBox     | center (3f) half_size (3f)                               |
/// | OBBox      | axes (9f, column major) center (3f) half_size (3f)       |
/// | Cone       | origin (3f) direction (3f) depth (f) cutoff (f) flag (u8) |

use std::io::{Read, Write};
use glam::{Mat3, Vec3};
use crate::bounds_bail;
use crate::error::Result;
use crate::volume::{AABBox, AABBoxExt, Cone, OBBox, OBBoxExt, Plane, Sphere};

const SOURCE: &str = "galaxy3d::bounds::wire";

/// Fixed binary layout of a shape.
pub trait WireFormat: Sized {
    /// Write the shape's fields to `writer`.
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()>;

    /// Read a shape written by [`WireFormat::write_to`].
    ///
    /// A stream ending early yields `Error::Io`.
    fn read_from<R: Read>(reader: &mut R) -> Result<Self>;
}

fn write_floats<W: Write>(writer: &mut W, values: &[f32]) -> Result<()> {
    writer.write_all(bytemuck::cast_slice(values))?;
    Ok(())
}

fn read_floats<R: Read, const N: usize>(reader: &mut R) -> Result<[f32; N]> {
    let mut values = [0.0f32; N];
    reader.read_exact(bytemuck::cast_slice_mut(&mut values))?;
    Ok(values)
}

fn vec3(values: &[f32]) -> Vec3 {
    Vec3::from_slice(values)
}

// ===== PLANE / SPHERE =====

impl WireFormat for Plane {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_floats(writer, &[self.normal.x, self.normal.y, self.normal.z, self.d])
    }

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let v = read_floats::<_, 4>(reader)?;
        Ok(Plane::new(vec3(&v[0..3]), v[3]))
    }
}

impl WireFormat for Sphere {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_floats(writer, &[self.center.x, self.center.y, self.center.z, self.radius])
    }

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let v = read_floats::<_, 4>(reader)?;
        // Written radius is kept as is, even if negative
        Ok(Sphere { center: vec3(&v[0..3]), radius: v[3] })
    }
}

// ===== BOXES =====

impl WireFormat for AABBox {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_floats(writer, &self.center.to_array())?;
        write_floats(writer, &self.half_size.to_array())
    }

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let v = read_floats::<_, 6>(reader)?;
        Ok(AABBox { center: vec3(&v[0..3]), half_size: vec3(&v[3..6]) })
    }
}

impl WireFormat for AABBoxExt {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.aabbox().write_to(writer)
    }

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(AABBoxExt::from_aabbox(AABBox::read_from(reader)?))
    }
}

impl WireFormat for OBBox {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_floats(writer, &self.axes.to_cols_array())?;
        write_floats(writer, &self.center.to_array())?;
        write_floats(writer, &self.half_size.to_array())
    }

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let v = read_floats::<_, 15>(reader)?;
        Ok(OBBox {
            axes: Mat3::from_cols_slice(&v[0..9]),
            center: vec3(&v[9..12]),
            half_size: vec3(&v[12..15]),
        })
    }
}

impl WireFormat for OBBoxExt {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.obbox().write_to(writer)
    }

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(OBBoxExt::from_obbox(OBBox::read_from(reader)?))
    }
}

// ===== CONE =====

impl WireFormat for Cone {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_floats(writer, &self.origin().to_array())?;
        write_floats(writer, &self.direction().to_array())?;
        write_floats(writer, &[self.depth(), self.cutoff()])?;
        writer.write_all(&[u8::from(self.is_spherical())])?;
        Ok(())
    }

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let v = read_floats::<_, 8>(reader)?;
        let mut flag = [0u8; 1];
        reader.read_exact(&mut flag)?;
        let spherical = match flag[0] {
            0 => false,
            1 => true,
            other => bounds_bail!(SOURCE, InvalidData, "Cone spherical flag {} is not 0 or 1", other),
        };
        Ok(Cone::new(vec3(&v[0..3]), vec3(&v[3..6]), v[6], v[7], spherical))
    }
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
