pub mod audio_file;
pub mod cloud_stt;
pub mod cloud_tts;
pub mod csv_report;
pub mod http_client;
pub mod model_fetcher;
pub mod system_player;
pub mod whisper_local;

pub use cloud_stt::CloudTranscriber;
pub use cloud_tts::CloudSynthesizer;
pub use http_client::ReqwestClient;
pub use model_fetcher::ModelFetcher;
pub use system_player::SystemPlayer;
pub use whisper_local::WhisperTranscriber;
