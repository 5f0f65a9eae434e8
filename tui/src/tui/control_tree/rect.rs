// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Screen area of a control, in 0-based cells, the same coordinate space as
/// [`MouseReport`].
///
/// [`MouseReport`]: crate::MouseReport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half open on the right and bottom edges: a `10x5` rect at the origin contains
    /// `(9, 4)` but not `(10, 4)`. Empty rects contain nothing.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let right = i64::from(self.x) + i64::from(self.width);
        let bottom = i64::from(self.y) + i64::from(self.height);
        x >= self.x && y >= self.y && i64::from(x) < right && i64::from(y) < bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 0, true ; "top left corner")]
    #[test_case(9, 4, true ; "bottom right cell")]
    #[test_case(10, 4, false ; "past right edge")]
    #[test_case(9, 5, false ; "past bottom edge")]
    #[test_case(-1, 0, false ; "negative x")]
    fn test_contains(x: i32, y: i32, expected: bool) {
        assert_eq!(Rect::new(0, 0, 10, 5).contains(x, y), expected);
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        assert!(!Rect::new(3, 3, 0, 0).contains(3, 3));
    }
}
