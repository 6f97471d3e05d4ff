pub mod http;
pub mod player;
pub mod synthesizer;
pub mod transcriber;

pub use http::{HttpClient, HttpResponse};
pub use player::AudioPlayer;
pub use synthesizer::SpeechSynthesizer;
pub use transcriber::{TranscriptionResult, Transcriber};
