//! Overlay colours (ARGB, 8 bits per channel)

/// Voxel fill colours, indexed by material
pub const FILL_COLORS: [u32; 8] = [
    0xFFAA574A, 0xFFBE647D, 0xFFB381B3, 0xFF84A5D7, 0xFF39C6DC, 0xFF30E0BF, 0xFF8BF28F, 0xFFE8F966,
];

/// Voxel outline colours, indexed by material
pub const OUTLINE_COLORS: [u32; 8] = [
    0xFF331E2A, 0xFF44374C, 0xFF4A546E, 0xFF45748C, 0xFF3896A0, 0xFF39B8A9, 0xFF5ED9A5, 0xFF97F799,
];

/// Yellow
pub const COLOR_MINION_YELLOW: u32 = 0xFFFFE74C;
/// Red
pub const COLOR_FIERY_ROSE: u32 = 0xFFFF5964;
/// Dark purple
pub const COLOR_PURPLE: u32 = 0xFF5F00BA;
/// Blue
pub const COLOR_BLUE_JEANS: u32 = 0xFF35A7FF;
/// Light purple
pub const COLOR_MAUVE: u32 = 0xFFD9BBF9;

/// Target cell and handle highlight
pub const COLOR_SELECTION: u32 = COLOR_MINION_YELLOW;
/// Box outline when too far away to edit
pub const COLOR_OUT_OF_REACH: u32 = COLOR_FIERY_ROSE;
/// Aligned working box
pub const COLOR_BOUNDING_BOX: u32 = COLOR_BLUE_JEANS;

/// Fill colour for a material index (wraps around)
#[inline]
pub fn fill_color(material: u32) -> u32 {
    FILL_COLORS[material as usize % FILL_COLORS.len()]
}

/// Outline colour for a material index (wraps around)
#[inline]
pub fn outline_color(material: u32) -> u32 {
    OUTLINE_COLORS[material as usize % OUTLINE_COLORS.len()]
}

/// Split into `[a, r, g, b]`
#[inline]
pub fn channels(color: u32) -> [u8; 4] {
    color.to_be_bytes()
}

/// Linear blend per channel, `t = 0` gives `a`, `t = 1` gives `b`
///
/// Channels are truncated, not rounded.
pub fn blend_colors(t: f32, a: u32, b: u32) -> u32 {
    let ca = channels(a);
    let cb = channels(b);
    let mixed: [u8; 4] =
        std::array::from_fn(|i| (t * cb[i] as f32 + (1.0 - t) * ca[i] as f32) as u8);
    u32::from_be_bytes(mixed)
}
