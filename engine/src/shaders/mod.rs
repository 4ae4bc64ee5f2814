//! Embedded WGSL shaders

/// Colored line shader used for the scene view grid
pub const GRID_SHADER: &str = include_str!("grid.wgsl");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shader_entry_points() {
        assert!(GRID_SHADER.contains("fn vs_main"));
        assert!(GRID_SHADER.contains("fn fs_main"));
    }
}
