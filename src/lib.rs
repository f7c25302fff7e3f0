//! Finds image posts on the miHoYo community forums and downloads their
//! images.
//!
//! [`bbs_api`] lists the image URLs of a page of posts, [`downloader`]
//! stores them in a folder named after the forum's game.

pub mod bbs_api;
pub mod catalog;
pub mod downloader;
