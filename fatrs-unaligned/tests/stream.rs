//! Integration tests for the embedded-io-async stream over the adapter.

mod common;

use common::FakeDevice;
use fatrs_unaligned::embedded_io_async::{Read, Seek, SeekFrom, Write};
use fatrs_unaligned::{StreamError, UnalignedBlockDevice, UnalignedStream};

async fn open(page_size: usize, pages: usize) -> anyhow::Result<UnalignedStream<FakeDevice>> {
    common::init_logging();
    let mut bd = UnalignedBlockDevice::new(FakeDevice::new(page_size, pages));
    bd.init().await?;
    Ok(UnalignedStream::new(bd))
}

/// Generic consumer, as a filesystem or config store would be.
async fn append_record<S: Write + Seek>(io: &mut S, record: &[u8]) -> Result<u64, S::Error> {
    let at = io.stream_position().await?;
    io.write_all(&(record.len() as u16).to_le_bytes()).await?;
    io.write_all(record).await?;
    Ok(at)
}

#[tokio::test]
async fn test_records_round_trip() -> anyhow::Result<()> {
    let mut s = open(16, 8).await?;

    let first = append_record(&mut s, b"alpha").await?;
    let second = append_record(&mut s, b"a longer record spanning pages").await?;
    assert_eq!(first, 0);
    assert_eq!(second, 7);

    Seek::seek(&mut s, SeekFrom::Start(second)).await?;
    let mut len = [0u8; 2];
    s.read_exact(&mut len)
        .await
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let mut body = vec![0u8; u16::from_le_bytes(len) as usize];
    s.read_exact(&mut body)
        .await
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    assert_eq!(body, b"a longer record spanning pages");

    // Every device transfer was a whole page.
    let device = s.into_inner().into_inner();
    assert!(device.reads() > 0);
    Ok(())
}

#[tokio::test]
async fn test_stream_fills_device_then_stops() -> anyhow::Result<()> {
    let mut s = open(8, 2).await?;

    s.write_all(&[0x5A; 16]).await?;
    let err = Write::write(&mut s, &[1]).await.unwrap_err();
    assert!(matches!(err, StreamError::OutOfBounds));

    Seek::seek(&mut s, SeekFrom::Start(0)).await?;
    let mut all = [0u8; 32];
    let n = Read::read(&mut s, &mut all).await?;
    assert_eq!(n, 16);
    assert!(all[..16].iter().all(|&b| b == 0x5A));
    Ok(())
}
