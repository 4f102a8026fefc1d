use tracing::info;

use crate::core::grid::PixelGrid;
use crate::core::params::PipelineParams;
use crate::core::processing::filters::{apply_blur, apply_sepia};
use crate::core::processing::resample::resample;
use crate::error::Result;

/// Blur then sepia, each only when requested.
pub fn apply_post_filters(grid: &mut PixelGrid, blur: bool, sepia: bool) {
    if blur {
        apply_blur(grid);
    }
    if sepia {
        apply_sepia(grid);
    }
}

/// Resample and post-filter a decoded grid into the primary output.
pub fn process_grid(grid: &PixelGrid, params: &PipelineParams) -> Result<PixelGrid> {
    params.validate()?;
    let mut out = resample(grid, params.scale, params.tint_inverse)?;
    apply_post_filters(&mut out, params.blur, params.sepia);
    info!(
        "Processed grid {}x{} (blur {}, sepia {})",
        out.width(),
        out.height(),
        params.blur,
        params.sepia
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::filters::{blur, sepia_pixel};
    use crate::types::Rgb;

    #[test]
    fn identity_params_leave_grid_untouched() {
        let g = PixelGrid::filled(3, 4, Rgb::new(7, 8, 9)).unwrap();
        let params = PipelineParams {
            scale: 1.0,
            ..PipelineParams::default()
        };
        assert_eq!(process_grid(&g, &params).unwrap(), g);
    }

    #[test]
    fn blur_runs_before_sepia() {
        let mut g = PixelGrid::new(3, 3).unwrap();
        g.set(1, 1, Rgb::new(200, 100, 50)).unwrap();
        let params = PipelineParams {
            scale: 1.0,
            blur: true,
            sepia: true,
            ..PipelineParams::default()
        };
        let out = process_grid(&g, &params).unwrap();
        let expected = sepia_pixel(blur(&g).get(0, 1).unwrap());
        assert_eq!(out.get(0, 1), Some(expected));
    }

    #[test]
    fn default_scale_halves_dimensions() {
        let g = PixelGrid::new(9, 6).unwrap();
        let out = process_grid(&g, &PipelineParams::default()).unwrap();
        assert_eq!(out.dim(), (4, 3));
    }
}
