//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Gzip for JSON bodies. Receipt images are served as stored.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
