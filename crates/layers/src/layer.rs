use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LayerId(pub u64);

impl LayerId {
    pub const EARTHQUAKES: LayerId = LayerId(1);
    pub const FAULT_LINES: LayerId = LayerId(2);
}

pub trait Layer {
    fn id(&self) -> LayerId;

    /// Display name used by the layer-selection control.
    fn name(&self) -> &str;

    fn feature_count(&self) -> usize;
}
