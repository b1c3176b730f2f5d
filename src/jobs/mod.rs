pub mod registry;
pub mod resolve;

pub use registry::{
    all_jobs, all_required_keys, bonus_token_id, descriptor_for, optimized_keys_for, JobDescriptor,
};
pub use resolve::{clean_job_key, resolve_job_key};
