use formats::FaultLineGeometry;

use crate::layer::{Layer, LayerId};

/// Plate boundaries drawn with the renderer's default path style.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultLineLayer {
    id: LayerId,
    geometry: FaultLineGeometry,
}

impl FaultLineLayer {
    pub const NAME: &'static str = "Fault Lines";

    pub fn geometry(&self) -> &FaultLineGeometry {
        &self.geometry
    }
}

impl Layer for FaultLineLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn feature_count(&self) -> usize {
        self.geometry.feature_count()
    }
}

pub fn build_fault_line_layer(geometry: FaultLineGeometry) -> FaultLineLayer {
    FaultLineLayer {
        id: LayerId::FAULT_LINES,
        geometry,
    }
}
