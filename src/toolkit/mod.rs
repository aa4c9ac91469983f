

pub mod phrase;


pub use phrase::{PhraseGenerator, PhraseRequest, PhraseSelection};
