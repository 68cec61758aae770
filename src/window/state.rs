//! Window state types
//!
//! Toolkit-side window enums and their mapping onto host window modes
//! and cursor shapes.

use bitflags::bitflags;

use crate::host::{CursorShape, HostWindowMode};

/// Toolkit window state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
    FullScreen,
}

impl WindowState {
    /// Host mode for this state
    pub fn to_host_mode(self) -> HostWindowMode {
        match self {
            WindowState::Normal => HostWindowMode::Windowed,
            WindowState::Minimized => HostWindowMode::Minimized,
            WindowState::Maximized => HostWindowMode::Maximized,
            WindowState::FullScreen => HostWindowMode::Fullscreen,
        }
    }

    /// State for a host mode; modes without a counterpart read as Normal
    pub fn from_host_mode(mode: HostWindowMode) -> Self {
        match mode {
            HostWindowMode::Windowed => WindowState::Normal,
            HostWindowMode::Minimized => WindowState::Minimized,
            HostWindowMode::Maximized => WindowState::Maximized,
            HostWindowMode::Fullscreen => WindowState::FullScreen,
            _ => WindowState::Normal,
        }
    }
}

/// Why the client size changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowResizeReason {
    #[default]
    Unspecified,
    User,
    Application,
    Layout,
    DpiChange,
}

/// Why the window is closing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowCloseReason {
    Undefined,
    WindowClosing,
    OwnerWindowClosing,
    ApplicationShutdown,
    OSShutdown,
}

/// Transparency levels the toolkit can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowTransparencyLevel {
    #[default]
    None,
    Transparent,
    Blur,
    AcrylicBlur,
    Mica,
}

impl WindowTransparencyLevel {
    /// Whether the host can honor this level
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            WindowTransparencyLevel::None | WindowTransparencyLevel::Transparent
        )
    }
}

/// Native decorations requested by the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SystemDecorations {
    None,
    BorderOnly,
    #[default]
    Full,
}

bitflags! {
    /// Chrome hints for a client area extended into the decorations
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ExtendClientAreaChromeHints: u32 {
        const NO_CHROME = 0;
        const SYSTEM_CHROME = 1 << 0;
        const PREFER_SYSTEM_CHROME = 1 << 1;
        const OSX_THICK_TITLE_BAR = 1 << 3;
    }
}

/// Edge grabbed for an interactive resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEdge {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

/// Standard cursors the toolkit asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardCursor {
    #[default]
    Arrow,
    Ibeam,
    Wait,
    Cross,
    UpArrow,
    SizeWestEast,
    SizeNorthSouth,
    SizeAll,
    No,
    Hand,
    AppStarting,
    Help,
    TopSide,
    BottomSide,
    LeftSide,
    RightSide,
    TopLeftCorner,
    TopRightCorner,
    BottomLeftCorner,
    BottomRightCorner,
    DragMove,
    DragCopy,
    DragLink,
}

impl StandardCursor {
    /// Closest host cursor shape
    pub fn to_host_shape(self) -> CursorShape {
        match self {
            StandardCursor::Arrow | StandardCursor::UpArrow => CursorShape::Arrow,
            StandardCursor::Ibeam => CursorShape::IBeam,
            StandardCursor::Wait => CursorShape::Wait,
            StandardCursor::AppStarting => CursorShape::Busy,
            StandardCursor::Cross => CursorShape::Cross,
            StandardCursor::SizeWestEast
            | StandardCursor::LeftSide
            | StandardCursor::RightSide => CursorShape::HSize,
            StandardCursor::SizeNorthSouth
            | StandardCursor::TopSide
            | StandardCursor::BottomSide => CursorShape::VSize,
            StandardCursor::SizeAll | StandardCursor::DragMove => CursorShape::Move,
            StandardCursor::TopLeftCorner | StandardCursor::BottomRightCorner => {
                CursorShape::FDiagSize
            }
            StandardCursor::TopRightCorner | StandardCursor::BottomLeftCorner => {
                CursorShape::BDiagSize
            }
            StandardCursor::No => CursorShape::Forbidden,
            StandardCursor::Hand => CursorShape::PointingHand,
            StandardCursor::Help => CursorShape::Help,
            StandardCursor::DragCopy | StandardCursor::DragLink => CursorShape::CanDrop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_state_round_trip() {
        for state in [
            WindowState::Normal,
            WindowState::Minimized,
            WindowState::Maximized,
            WindowState::FullScreen,
        ] {
            assert_eq!(WindowState::from_host_mode(state.to_host_mode()), state);
        }
    }

    #[test]
    fn test_unmapped_mode_is_normal() {
        assert_eq!(
            WindowState::from_host_mode(HostWindowMode::ExclusiveFullscreen),
            WindowState::Normal
        );
    }

    #[test]
    fn test_transparency_support() {
        assert!(WindowTransparencyLevel::Transparent.is_supported());
        assert!(!WindowTransparencyLevel::Mica.is_supported());
    }

    #[test]
    fn test_cursor_mapping() {
        assert_eq!(StandardCursor::Hand.to_host_shape(), CursorShape::PointingHand);
        assert_eq!(StandardCursor::Ibeam.to_host_shape(), CursorShape::IBeam);
        assert_eq!(
            StandardCursor::TopLeftCorner.to_host_shape(),
            CursorShape::FDiagSize
        );
    }
}
