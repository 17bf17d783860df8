pub mod badge;
pub mod error_banner;
pub mod filter_select;
pub mod modal;
pub mod pagination_controls;
pub mod sortable_header;
pub mod stat_card;
