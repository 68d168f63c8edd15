//! Layout calculations for the UI

use crate::model::snap::SnapPoint;
use ratatui::layout::Rect;

/// Calculate the bottom-anchored sheet area for a height fraction
pub fn sheet_area(area: Rect, fraction: f32) -> Rect {
    let fraction = fraction.clamp(0.0, 1.0);
    let height = (f32::from(area.height) * fraction).round() as u16;
    let height = height.min(area.height);

    Rect::new(
        area.x,
        area.y + area.height - height,
        area.width,
        height,
    )
}

/// Map a dragged terminal row to the snap point the sheet should settle at.
///
/// The row is compared against the resting heights of each snap point;
/// dragging below half the Partial height dismisses the sheet (`Hidden`).
pub fn snap_for_row(area: Rect, row: u16, partial: f32, full: f32) -> SnapPoint {
    if area.height == 0 {
        return SnapPoint::Hidden;
    }
    let bottom = area.y + area.height;
    let dragged = f32::from(bottom.saturating_sub(row.min(bottom))) / f32::from(area.height);

    if dragged < partial / 2.0 {
        SnapPoint::Hidden
    } else if dragged < (partial + full) / 2.0 {
        SnapPoint::Partial
    } else {
        SnapPoint::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_area_is_bottom_anchored() {
        let screen = Rect::new(0, 0, 80, 40);
        let sheet = sheet_area(screen, 0.5);
        assert_eq!(sheet.height, 20);
        assert_eq!(sheet.y, 20);
        assert_eq!(sheet.width, 80);

        assert_eq!(sheet_area(screen, 0.0).height, 0);
        assert_eq!(sheet_area(screen, 1.0).height, 40);
    }

    #[test]
    fn test_snap_for_row_picks_nearest() {
        let screen = Rect::new(0, 0, 80, 40);
        // Near the bottom: dismiss
        assert_eq!(snap_for_row(screen, 38, 0.45, 0.9), SnapPoint::Hidden);
        // Around the partial height
        assert_eq!(snap_for_row(screen, 22, 0.45, 0.9), SnapPoint::Partial);
        // Near the top: full
        assert_eq!(snap_for_row(screen, 2, 0.45, 0.9), SnapPoint::Full);
    }
}
