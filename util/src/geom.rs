use glam::{ivec2, IVec2};

/// 8 directions, clock face order.
///
/// Index in the array is the bit index used by neighbor masks, north is bit
/// 0 and the rest go clockwise.
pub const DIR_8: [IVec2; 8] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([1, 1]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 1]),
    IVec2::from_array([-1, 0]),
    IVec2::from_array([-1, -1]),
];

/// 4 directions, clock face order.
pub const DIR_4: [IVec2; 4] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 0]),
];

/// Build a bit mask from the 8 neighbors of `pos`.
///
/// Bit `i` is set when `f` is true for `pos + DIR_8[i]`.
pub fn neighbor_mask_8(f: impl Fn(IVec2) -> bool, pos: IVec2) -> u8 {
    DIR_8
        .iter()
        .enumerate()
        .filter(|&(_, &d)| f(pos + d))
        .fold(0, |acc, (i, _)| acc | (1 << i))
}

/// Iterate the 3x3 block centered on `pos`, center included, in row-major
/// order.
pub fn area_3x3(pos: IVec2) -> impl Iterator<Item = IVec2> {
    (-1..=1).flat_map(move |y| (-1..=1).map(move |x| pos + ivec2(x, y)))
}
