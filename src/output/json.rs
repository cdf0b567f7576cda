use crate::listing::ListingItem;
use crate::FeedError;
use std::io::Write;

/// Serializes a feed to a compact JSON array
pub fn feed_to_json(feed: &[ListingItem]) -> Result<String, FeedError> {
    Ok(serde_json::to_string(feed)?)
}

/// Writes a feed as a JSON array followed by a newline
///
/// # Arguments
///
/// * `feed` - The aggregated feed
/// * `writer` - Destination, usually stdout
/// * `pretty` - Indent the output for humans
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the feed
/// * `Err(FeedError)` - Serialization or IO failure
pub fn write_feed_json<W: Write>(
    feed: &[ListingItem],
    mut writer: W,
    pretty: bool,
) -> Result<(), FeedError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, feed)?;
    } else {
        serde_json::to_writer(&mut writer, feed)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}
