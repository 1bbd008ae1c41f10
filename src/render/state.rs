/// How a drawn layer combines with what is already in the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// `src * a + dst * (1 - a)`
    Alpha,
    /// `src * a + dst`
    Additive,
}

/// Fixed draw state of a transparent layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawState {
    pub blend: BlendMode,
    /// Transparent layers must not write depth, or a fading ribbon would
    /// hide what is behind it
    pub depth_write: bool,
    pub double_sided: bool,
}

/// Garland ribbon: blended, seen from both sides
pub const RIBBON_STATE: DrawState = DrawState {
    blend: BlendMode::Alpha,
    depth_write: false,
    double_sided: true,
};

/// Snow sprites: glow adds up where flakes overlap
pub const SNOW_STATE: DrawState = DrawState {
    blend: BlendMode::Additive,
    depth_write: false,
    double_sided: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_layers_skip_depth_writes() {
        assert!(!RIBBON_STATE.depth_write);
        assert!(!SNOW_STATE.depth_write);
        assert_eq!(RIBBON_STATE.blend, BlendMode::Alpha);
        assert_eq!(SNOW_STATE.blend, BlendMode::Additive);
    }
}
