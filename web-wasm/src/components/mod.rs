pub mod accommodation;
pub mod contact;
pub mod gallery;
pub mod home;
pub mod login_modal;
pub mod nav_bar;
pub mod payment;
pub mod rsvp;
pub mod when_where;
