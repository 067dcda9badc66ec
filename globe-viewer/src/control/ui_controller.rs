use globe_common::{CoordinateParseError, parse_coordinates};

use crate::data::application_data::ApplicationData;

pub struct UiController;

impl UiController {
    pub fn new() -> Self {
        Self
    }

    /// Parses a submitted coordinate payload and replaces the preview line
    /// set. The text is validated before anything is cleared, so a bad
    /// submission leaves the previous lines on screen.
    pub fn submit_coordinates(
        &mut self,
        text: &str,
        data: &mut ApplicationData,
    ) -> Result<(), CoordinateParseError> {
        let entries = parse_coordinates(text)?;
        log::debug!("parsed {} coordinate entries", entries.len());
        data.replace_preview(entries);
        Ok(())
    }
}

impl Default for UiController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use globe_common::{CoordinateEntry, GeoCoord};

    use super::*;

    fn new_data() -> ApplicationData {
        ApplicationData::new((800.0, 600.0).into())
    }

    #[test]
    fn successful_submission_replaces_the_line_set() {
        let mut controller = UiController::new();
        let mut data = new_data();
        data.replace_preview(vec![CoordinateEntry::Marker(GeoCoord::new(1.0, 2.0))]);
        data.preview_dirty = false;

        controller
            .submit_coordinates("[[10, 20], [30, 40]]", &mut data)
            .unwrap();

        assert_eq!(data.preview_entries.len(), 2);
        assert!(data.preview_dirty);
    }

    #[test]
    fn failed_submission_keeps_the_previous_line_set() {
        let mut controller = UiController::new();
        let mut data = new_data();
        let previous = vec![CoordinateEntry::Marker(GeoCoord::new(1.0, 2.0))];
        data.replace_preview(previous.clone());
        data.preview_dirty = false;

        let result = controller.submit_coordinates("not json", &mut data);

        assert!(result.is_err());
        assert_eq!(data.preview_entries, previous);
        assert!(!data.preview_dirty);
    }
}
