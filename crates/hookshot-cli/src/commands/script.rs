//! Scripted input for headless runs.
//!
//! A script is a list of segments, each holding both control groups' levels
//! for a number of frames:
//!
//! ```toml
//! [[segments]]
//! frames = 30
//! right = { shoot = true, aim = { right = 1.0 } }
//!
//! [[segments]]
//! frames = 60
//! ```

use hookshot_core::{HookshotError, Result};
use hookshot_runtime::{ControlGroup, GroupLevels};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputScript {
    #[serde(default)]
    pub segments: Vec<ScriptSegment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptSegment {
    pub frames: u32,
    #[serde(default)]
    pub left: GroupLevels,
    #[serde(default)]
    pub right: GroupLevels,
}

impl ScriptSegment {
    pub fn levels(&self, group: ControlGroup) -> GroupLevels {
        match group {
            ControlGroup::Left => self.left,
            ControlGroup::Right => self.right,
        }
    }
}

impl InputScript {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let script: InputScript = toml::from_str(text)?;
        if script.segments.iter().any(|s| s.frames == 0) {
            return Err(HookshotError::ScriptError(
                "segments must last at least one frame".into(),
            ));
        }
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn total_frames(&self) -> u32 {
        self.segments.iter().map(|s| s.frames).sum()
    }

    /// Segment active on `frame`; idle past the end
    pub fn segment_at(&self, frame: u32) -> Option<&ScriptSegment> {
        let mut start = 0;
        for segment in &self.segments {
            if frame < start + segment.frames {
                return Some(segment);
            }
            start += segment.frames;
        }
        None
    }

    pub fn levels_at(&self, frame: u32, group: ControlGroup) -> GroupLevels {
        self.segment_at(frame)
            .map(|s| s.levels(group))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
[[segments]]
frames = 2
right = { shoot = true, aim = { right = 1.0 } }

[[segments]]
frames = 3
left = { grab = true }
"#;

    #[test]
    fn segments_cover_their_frames() {
        let script = InputScript::from_toml_str(SCRIPT).unwrap();
        assert_eq!(script.total_frames(), 5);
        assert!(script.levels_at(1, ControlGroup::Right).shoot);
        assert!(!script.levels_at(2, ControlGroup::Right).shoot);
        assert!(script.levels_at(4, ControlGroup::Left).grab);
        assert_eq!(script.levels_at(5, ControlGroup::Left), GroupLevels::default());
    }

    #[test]
    fn empty_segment_is_rejected() {
        let err = InputScript::from_toml_str("[[segments]]\nframes = 0\n").unwrap_err();
        assert!(matches!(err, HookshotError::ScriptError(_)));
    }

    #[test]
    fn empty_script_is_idle() {
        let script = InputScript::from_toml_str("").unwrap();
        assert_eq!(script.total_frames(), 0);
        assert!(script.segment_at(0).is_none());
    }
}
