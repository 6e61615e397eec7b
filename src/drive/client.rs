//! # Bounded Drive downloads
//!
//! File content is fetched in fixed-size ranged chunks and accumulated in
//! memory. A caller-supplied byte ceiling bounds the buffer: the transfer
//! aborts with `FileTooLarge` on the first chunk that pushes the total past
//! the ceiling, so memory never exceeds ceiling + one chunk regardless of
//! the remote file's true size.

use reqwest::StatusCode;
use reqwest::header::RANGE;
use tracing::debug;

use crate::client::CLIENT;
use crate::error::ClassroomError;

const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Bytes requested per ranged GET.
pub const CHUNK_SIZE: u64 = 10 * 1024 * 1024;

/// Downloads a Drive file into memory, failing with `FileTooLarge` once the
/// accumulated content exceeds `max_file_size`.
pub fn download_file(
    token: &str,
    file_id: &str,
    max_file_size: u64,
) -> Result<Vec<u8>, ClassroomError> {
    download_chunked(max_file_size, CHUNK_SIZE, |offset, len| {
        fetch_chunk(token, file_id, offset, len)
    })
}

/// Core accumulation loop, generic over the chunk fetcher.
///
/// `fetch` returns the bytes at `[offset, offset + len)`; a short or empty
/// chunk marks the end of the file. The ceiling is compared against bytes
/// actually written, so a file no larger than `max_file_size` always
/// downloads in full. On failure the partial buffer is dropped, never
/// returned.
fn download_chunked<F>(
    max_file_size: u64,
    chunk_size: u64,
    mut fetch: F,
) -> Result<Vec<u8>, ClassroomError>
where
    F: FnMut(u64, u64) -> Result<Vec<u8>, ClassroomError>,
{
    let mut buffer = Vec::new();
    loop {
        let chunk = fetch(buffer.len() as u64, chunk_size)?;
        let done = (chunk.len() as u64) < chunk_size;
        buffer.extend_from_slice(&chunk);
        debug!(bytes = buffer.len(), "downloaded chunk");
        if buffer.len() as u64 > max_file_size {
            return Err(ClassroomError::FileTooLarge {
                limit: max_file_size,
            });
        }
        if done {
            return Ok(buffer);
        }
    }
}

/// One ranged GET against the Drive media endpoint. An offset at
/// end-of-file answers 416, which maps to an empty chunk.
fn fetch_chunk(
    token: &str,
    file_id: &str,
    offset: u64,
    len: u64,
) -> Result<Vec<u8>, ClassroomError> {
    let url = format!("{DRIVE_BASE_URL}/files/{file_id}?alt=media");
    let res = CLIENT
        .get(&url)
        .bearer_auth(token)
        .header(RANGE, format!("bytes={}-{}", offset, offset + len - 1))
        .send()?;

    if res.status() == StatusCode::RANGE_NOT_SATISFIABLE {
        return Ok(Vec::new());
    }
    if !res.status().is_success() {
        let status = res.status();
        let message = res.text().unwrap_or_default();
        return Err(ClassroomError::Api { status, message });
    }
    Ok(res.bytes()?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serves `data` chunk by chunk the way a ranged remote would: bytes at
    /// the requested offset, short on the last chunk, empty past the end.
    fn chunks_of(data: &[u8]) -> impl FnMut(u64, u64) -> Result<Vec<u8>, ClassroomError> + '_ {
        move |offset, len| {
            let start = data.len().min(offset as usize);
            let end = data.len().min(start + len as usize);
            Ok(data[start..end].to_vec())
        }
    }

    #[test]
    fn small_file_round_trips() {
        let data: Vec<u8> = (0..100u8).collect();
        let out = download_chunked(1000, 16, chunks_of(&data)).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn ceiling_equal_to_file_size_succeeds() {
        let data = vec![7u8; 64];
        let out = download_chunked(64, 16, chunks_of(&data)).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn file_larger_than_ceiling_is_rejected() {
        let data = vec![1u8; 200];
        match download_chunked(100, 16, chunks_of(&data)) {
            Err(ClassroomError::FileTooLarge { limit }) => assert_eq!(limit, 100),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn buffer_never_grows_past_ceiling_plus_one_chunk() {
        let data = vec![2u8; 1000];
        let ceiling = 100;
        let chunk = 16;
        let mut max_offset = 0;
        let result = download_chunked(ceiling, chunk, |offset, len| {
            max_offset = max_offset.max(offset);
            chunks_of(&data)(offset, len)
        });
        assert!(matches!(result, Err(ClassroomError::FileTooLarge { .. })));
        // Every fetch started at or below the ceiling, so the buffer held at
        // most ceiling + chunk bytes before the transfer failed.
        assert!(max_offset <= ceiling);
    }

    #[test]
    fn file_ending_exactly_on_a_chunk_boundary_completes() {
        let data = vec![3u8; 32];
        let out = download_chunked(1000, 16, chunks_of(&data)).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn empty_file_downloads_as_empty_buffer() {
        let out = download_chunked(1000, 16, chunks_of(&[])).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn fetch_errors_propagate() {
        let result = download_chunked(1000, 16, |_, _| {
            Err(ClassroomError::Api {
                status: StatusCode::NOT_FOUND,
                message: "File not found".to_string(),
            })
        });
        assert!(matches!(result, Err(ClassroomError::Api { .. })));
    }
}
