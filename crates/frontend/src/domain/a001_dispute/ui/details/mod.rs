//! Карточка спора (MVVM):
//! - view_model.rs: загрузка и поток действия по спору
//! - view.rs: страница
//! - evidence.rs, comments.rs, resolution_form.rs: секции страницы
//!
//! HTTP-вызовы лежат в `a001_dispute::api`, общем со списком.

mod comments;
mod evidence;
mod resolution_form;
mod view;
mod view_model;

pub use view::DisputeDetails;
pub use view_model::DisputeDetailsViewModel;
