use crate::foundation::core::Point;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Unit interval float to a rounded 8-bit value.
pub(crate) fn unit_to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Scale factor applied to canvas geometry at a mip level (`2^-level`).
pub fn mip_scale(mip_level: u32) -> f64 {
    if mip_level == 0 {
        1.0
    } else {
        1.0 / f64::from(1u32 << mip_level.min(31))
    }
}

pub(crate) fn scale_point_to_mip(p: Point, mip_level: u32) -> Point {
    if mip_level == 0 {
        return p;
    }
    let s = mip_scale(mip_level);
    Point::new(p.x * s, p.y * s)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
