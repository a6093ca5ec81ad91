mod model;

pub use model::SampleAnswers;
