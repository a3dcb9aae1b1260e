pub mod video_urls;

pub use video_urls::parse_video_urls;
