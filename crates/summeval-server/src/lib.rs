//! HTTP gateway for the summeval library.

pub mod gateway;
