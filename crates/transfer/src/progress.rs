/// Percentage of chunks sent, rounded down and clamped to `0..=100`.
///
/// Returns 0 when `total_chunks` is 0.
pub fn percent(chunks_sent: u64, total_chunks: u64) -> u8 {
    if total_chunks == 0 {
        return 0;
    }
    let sent = chunks_sent.min(total_chunks) as u128;
    (sent * 100 / total_chunks as u128) as u8
}
