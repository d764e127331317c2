//! Auto-fit and boundary clamp for 3D instantiation and dragging

pub mod autofit;
pub mod clamp;

use glam::DVec3;
use serde::Serialize;
use shared::Footprint;

pub use autofit::{auto_fit, base_scale, floor_offset, Aabb, AutoFit};
pub use clamp::{clamp_axis, clamp_plan, clamp_world};

use crate::loader::{LoadedAsset, MeshHandle};

/// What the 3D renderer should draw for an instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshSource {
    Asset { handle: MeshHandle },
    ProxyBox { width: f64, height: f64, length: f64 },
}

/// Result of an asset load for one instance.
///
/// Only the loaded facts are stored; scale and rest height are derived from
/// the instance's current footprint so they follow resizes and undo.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Fitted { asset: LoadedAsset, y_offset: f64 },
    /// Stand-in box used when the asset failed to load or there is none
    Proxy,
}

impl Placement {
    fn proxy_bounds(footprint: Footprint, proxy_height: f64) -> Aabb {
        Aabb::centered(DVec3::new(footprint.width, proxy_height, footprint.length))
    }

    /// Auto-fit scale before the user's scale factor
    pub fn base_scale(&self, footprint: Footprint, wall_height: f64) -> f64 {
        match self {
            Placement::Fitted { asset, .. } => base_scale(&asset.bounds, footprint, wall_height),
            Placement::Proxy => 1.0,
        }
    }

    /// World-space `y` that rests the model on the floor at `scale_factor`
    pub fn resting_height(
        &self,
        footprint: Footprint,
        scale_factor: f64,
        wall_height: f64,
        proxy_height: f64,
    ) -> f64 {
        let total = self.base_scale(footprint, wall_height) * scale_factor;
        match self {
            Placement::Fitted { asset, y_offset } => floor_offset(&asset.bounds, total) + y_offset,
            Placement::Proxy => floor_offset(&Self::proxy_bounds(footprint, proxy_height), total),
        }
    }

    pub fn mesh_source(&self, footprint: Footprint, proxy_height: f64) -> MeshSource {
        match self {
            Placement::Fitted { asset, .. } => MeshSource::Asset { handle: asset.mesh },
            Placement::Proxy => MeshSource::ProxyBox {
                width: footprint.width,
                height: proxy_height,
                length: footprint.length,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn chair() -> Placement {
        Placement::Fitted {
            asset: LoadedAsset {
                bounds: Aabb::new(DVec3::new(-0.5, -0.25, -0.5), DVec3::new(0.5, 0.75, 0.5)),
                mesh: MeshHandle(7),
            },
            y_offset: 0.0,
        }
    }

    #[test]
    fn test_fitted_rest_height() {
        // 1x1x1 native, footprint 2x2: base 2, min.y -0.25 -> 0.5
        let p = chair();
        let fp = Footprint::new(2.0, 2.0);
        assert_relative_eq!(p.base_scale(fp, 5.0), 2.0);
        assert_relative_eq!(p.resting_height(fp, 1.0, 5.0, 2.0), 0.5);
        assert_relative_eq!(p.resting_height(fp, 2.0, 5.0, 2.0), 1.0);
    }

    #[test]
    fn test_y_offset_is_added() {
        let Placement::Fitted { asset, .. } = chair() else { unreachable!() };
        let p = Placement::Fitted { asset, y_offset: 0.1 };
        assert_relative_eq!(p.resting_height(Footprint::new(2.0, 2.0), 1.0, 5.0, 2.0), 0.6);
    }

    #[test]
    fn test_proxy_sits_on_floor() {
        let fp = Footprint::new(3.0, 4.0);
        assert_relative_eq!(Placement::Proxy.resting_height(fp, 1.0, 5.0, 2.0), 1.0);
        assert_relative_eq!(Placement::Proxy.resting_height(fp, 1.5, 5.0, 2.0), 1.5);
        assert_eq!(
            Placement::Proxy.mesh_source(fp, 2.0),
            MeshSource::ProxyBox { width: 3.0, height: 2.0, length: 4.0 }
        );
    }

    #[test]
    fn test_fit_follows_footprint() {
        let p = chair();
        assert_relative_eq!(p.base_scale(Footprint::new(4.0, 3.0), 5.0), 3.0);
    }
}
