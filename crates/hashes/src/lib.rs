#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod align;
mod cookie;
mod engine;
mod error;
mod lanes;
mod params;
mod registry;
mod single;
mod trace;

pub mod ffi;

#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
pub mod parallel;

pub use align::{AlignedSlice, AlignedSplit, alignment_offset, bytes_to_aligned, split_aligned};
pub use engine::reference::x4djbx33a_128_ref;
pub use engine::scalar::x4djbx33a_128_scalar;
pub use engine::{DIGEST_LEN_128, Engine, UnknownAlgorithm};
pub use error::{
    HX4_ERR_BUFFER_TOO_SMALL, HX4_ERR_COOKIE_TOO_SMALL, HX4_ERR_OVERLAP, HX4_ERR_PARAM_INVALID,
    HX4_ERR_SUCCESS, HashError, result_code,
};
pub use lanes::{LANES, SEED};
pub use params::{Region, validate};
pub use registry::{
    Capabilities, Digest, Family, Hasher, Primitive, available_primitives, capabilities, fastest,
};
pub use single::{DIGEST_LEN_32, djbx33a_32_ref, djbx33a_32_scalar};
