// Binocular eye selector. The device model is fixed to two eyes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-serialization",
    derive(serde::Deserialize, serde::Serialize)
)]
pub enum VREye {
    Left,
    Right,
}

impl VREye {
    // Array index for per-eye storage, left first.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            VREye::Left => 0,
            VREye::Right => 1,
        }
    }

    pub const BOTH: [VREye; 2] = [VREye::Left, VREye::Right];
}
