pub mod evaluator;
pub mod featurizer;
pub mod label_encoder;
pub mod model;
pub mod sdca;
