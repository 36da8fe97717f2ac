//! Components of the bookings screen

pub mod assign_modal;
pub mod booking_detail;
pub mod booking_list;
pub mod confirm_modal;
pub mod footer;
pub mod header;
pub mod modal_overlay;
pub mod toast;

pub use assign_modal::{AssignModal, AssignModalProps};
pub use booking_detail::{BookingDetail, BookingDetailProps};
pub use booking_list::{BookingList, BookingListProps, BookingRow, BookingRowProps};
pub use confirm_modal::{ConfirmModal, ConfirmModalProps};
pub use footer::{
    Footer, FooterProps, Shortcut, assign_shortcuts, confirm_shortcuts, list_shortcuts,
};
pub use header::{Header, HeaderProps};
pub use modal_overlay::{MODAL_BACKDROP, ModalOverlay, ModalOverlayProps};
pub use toast::render_toast;
