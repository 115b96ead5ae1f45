pub mod dispatch_service;
pub mod generation_service;
pub mod prompt_builder;
