mod bridge;
mod renderer;

pub use bridge::{inject_bridge, AD_SDK_BRIDGE_JS};
pub use renderer::PreviewRenderer;
