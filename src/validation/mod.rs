mod net;

pub use net::Validator;
