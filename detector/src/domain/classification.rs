//! Laugh decision derived from a single frame's expressions.
//!
//! Every frame is classified on its own. There is no smoothing, so a
//! probability hovering around the threshold flips the result frame to frame.

use serde::{Deserialize, Serialize};

use super::expression::FaceDetection;

/// `happy` must be strictly above this to count as laughing
pub const LAUGH_THRESHOLD: f64 = 0.65;

pub const NO_FACE_STATUS: &str = "No face detected";
pub const NOT_LAUGHING_STATUS: &str = "Looking... no strong laughter detected";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub is_laughing: bool,
    pub status_text: String,
}

impl ClassificationResult {
    fn not_laughing(status: &str) -> Self {
        Self {
            is_laughing: false,
            status_text: status.to_string(),
        }
    }
}

/// Maps the latest detection to the laughing flag and status line
pub fn classify(detection: Option<&FaceDetection>, display_name: &str) -> ClassificationResult {
    let Some(detection) = detection else {
        return ClassificationResult::not_laughing(NO_FACE_STATUS);
    };

    let happy = detection.expressions.happy();
    if happy > LAUGH_THRESHOLD {
        ClassificationResult {
            is_laughing: true,
            status_text: format!(
                "{} is laughing — joy: {}%",
                display_name,
                joy_percent(happy)
            ),
        }
    } else {
        ClassificationResult::not_laughing(NOT_LAUGHING_STATUS)
    }
}

/// Rounds half up, like the percentage a browser would show
pub fn joy_percent(probability: f64) -> i64 {
    (probability * 100.0 + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expression::{BoundingBox, Expressions, FrameSize, HAPPY};
    use proptest::prelude::*;

    fn face(happy: f64) -> FaceDetection {
        FaceDetection {
            image_size: FrameSize::new(640, 480),
            bounding_box: BoundingBox {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            },
            landmarks: Vec::new(),
            expressions: Expressions::new().with(HAPPY, happy),
        }
    }

    #[test]
    fn test_laughing_scenario() {
        let result = classify(Some(&face(0.9)), "Reagan");
        assert_eq!(
            result,
            ClassificationResult {
                is_laughing: true,
                status_text: "Reagan is laughing — joy: 90%".to_string(),
            }
        );
    }

    #[test]
    fn test_not_laughing_scenario() {
        let result = classify(Some(&face(0.2)), "Reagan");
        assert!(!result.is_laughing);
        assert_eq!(result.status_text, NOT_LAUGHING_STATUS);
    }

    #[test]
    fn test_no_face() {
        let result = classify(None, "Reagan");
        assert!(!result.is_laughing);
        assert_eq!(result.status_text, NO_FACE_STATUS);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!classify(Some(&face(LAUGH_THRESHOLD)), "x").is_laughing);
        assert!(classify(Some(&face(0.651)), "x").is_laughing);
    }

    #[test]
    fn test_missing_happy_is_not_laughing() {
        let mut detection = face(0.0);
        detection.expressions = Expressions::new().with("neutral", 0.99);
        assert_eq!(
            classify(Some(&detection), "Reagan").status_text,
            NOT_LAUGHING_STATUS
        );
    }

    #[test]
    fn test_joy_percent_rounds_half_up() {
        assert_eq!(joy_percent(0.655), 66);
        assert_eq!(joy_percent(0.994), 99);
        assert_eq!(joy_percent(1.0), 100);
    }

    proptest! {
        #[test]
        fn prop_at_or_below_threshold_never_laughs(p in 0.0f64..=LAUGH_THRESHOLD) {
            prop_assert!(!classify(Some(&face(p)), "Reagan").is_laughing);
        }

        #[test]
        fn prop_above_threshold_laughs_with_percentage(p in 0.6501f64..=1.0) {
            let result = classify(Some(&face(p)), "Reagan");
            prop_assert!(result.is_laughing);
            let expected = format!("{}%", joy_percent(p));
            prop_assert!(result.status_text.contains(&expected));
        }

        #[test]
        fn prop_no_face_ignores_name(name in "[A-Za-z ]{0,16}") {
            prop_assert_eq!(classify(None, &name).status_text, NO_FACE_STATUS);
        }
    }
}
