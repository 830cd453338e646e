use std::time::Duration;

use super::view::{ViewId, ViewInfo, ViewKind};
use crate::bridge::BridgeConfig;
use crate::time::FrameClock;
use crate::translate::{ColorPolicy, TranslatorConfig};

/// Which views receive the overlay.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ViewPolicy {
    /// Only the view with this id.
    Designated(ViewId),
    /// The first non-preview view drawn in each logical frame.
    #[default]
    FirstNonPreview,
}

impl ViewPolicy {
    pub fn accepts(&self, view: &ViewInfo) -> bool {
        match self {
            ViewPolicy::Designated(id) => view.id == *id,
            ViewPolicy::FirstNonPreview => view.kind != ViewKind::EditorPreview,
        }
    }
}

/// Overlay host configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub translator: TranslatorConfig,
    pub bridge: BridgeConfig,
    pub view_policy: ViewPolicy,

    /// Delta-time floor handed to the GUI.
    pub dt_min: Duration,
    /// Delta-time ceiling after stalls.
    pub dt_max: Duration,
}

impl Default for OverlayConfig {
    /// Linear vertex colors (the wgpu host renders to an sRGB surface), top-left scissors and
    /// pointer origin, first non-preview view.
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::new(ColorPolicy::Linear),
            bridge: BridgeConfig::default(),
            view_policy: ViewPolicy::default(),
            dt_min: FrameClock::DEFAULT_DT_MIN,
            dt_max: FrameClock::DEFAULT_DT_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_non_preview_rejects_previews() {
        let game = ViewInfo::game(ViewId(1), [1.0, 1.0], 1.0, 0);
        let preview = ViewInfo {
            kind: ViewKind::EditorPreview,
            ..game
        };
        assert!(ViewPolicy::FirstNonPreview.accepts(&game));
        assert!(!ViewPolicy::FirstNonPreview.accepts(&preview));
    }

    #[test]
    fn designated_accepts_only_its_view() {
        let a = ViewInfo::game(ViewId(1), [1.0, 1.0], 1.0, 0);
        let b = ViewInfo { id: ViewId(2), ..a };
        let preview = ViewInfo { kind: ViewKind::EditorPreview, ..a };
        let policy = ViewPolicy::Designated(ViewId(1));
        assert!(policy.accepts(&a));
        assert!(!policy.accepts(&b));
        assert!(policy.accepts(&preview));
    }
}
