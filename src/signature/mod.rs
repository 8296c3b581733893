mod agent;
mod create_signature;

pub use agent::Agent;
pub use create_signature::{
    create_l1_action_hash, sign_l1_action, sign_typed_data, split_signature, SignatureParts,
};
