//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::fmt;

use fatrs_unaligned::{PageDevice, StatusCode};

/// Driver status returned by injected faults.
pub const FAULT_CODE: i32 = -5;

/// Set up logging once per test binary. Run with `RUST_LOG=trace` to see
/// the adapter's per-page trace.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError(pub i32);

impl fmt::Display for FakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fake device error {}", self.0)
    }
}

impl std::error::Error for FakeError {}

impl StatusCode for FakeError {
    fn status_code(&self) -> i32 {
        self.0
    }
}

/// One device-level call seen by [`FakeDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Init,
    Read { addr: u64, len: usize },
    Program { addr: u64, len: usize },
}

/// In-memory page device that records every call and can fail on demand.
///
/// Reads and programs panic unless they cover exactly one aligned page,
/// so any test driving it also checks the adapter only issues whole-page
/// transfers.
#[derive(Debug)]
pub struct FakeDevice {
    pub data: Vec<u8>,
    page_size: usize,
    ops: Vec<Op>,
    read_attempts: usize,
    program_attempts: usize,
    fail_init: bool,
    fail_read: Option<usize>,
    fail_program: Option<usize>,
}

impl FakeDevice {
    /// Device of `pages` pages of `page_size` bytes, all starting at 0xFF.
    pub fn new(page_size: usize, pages: usize) -> Self {
        Self::with_size(page_size, (page_size * pages) as u64)
    }

    /// Device with an explicit total size, which need not be page aligned.
    pub fn with_size(page_size: usize, total: u64) -> Self {
        Self {
            data: vec![0xFF; total as usize],
            page_size,
            ops: Vec::new(),
            read_attempts: 0,
            program_attempts: 0,
            fail_init: false,
            fail_read: None,
            fail_program: None,
        }
    }

    /// Fill the device with a recognisable pattern: byte `i` holds `i as u8`.
    pub fn patterned(mut self) -> Self {
        for (i, b) in self.data.iter_mut().enumerate() {
            *b = i as u8;
        }
        self
    }

    /// Takes effect on the next `init`.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
    }

    pub fn fail_init(&mut self, fail: bool) {
        self.fail_init = fail;
    }

    /// Fail the `n`th read from now (0 = the next one).
    pub fn fail_read_after(&mut self, n: usize) {
        self.fail_read = Some(self.read_attempts + n);
    }

    /// Fail the `n`th program from now (0 = the next one).
    pub fn fail_program_after(&mut self, n: usize) {
        self.fail_program = Some(self.program_attempts + n);
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub fn reads(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Read { .. })).count()
    }

    pub fn programs(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Program { .. })).count()
    }

    /// Addresses of recorded programs, in order.
    pub fn programmed_pages(&self) -> Vec<u64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Program { addr, .. } => Some(*addr),
                _ => None,
            })
            .collect()
    }

    fn check_page(&self, addr: u64, len: usize) {
        assert_eq!(addr % self.page_size as u64, 0, "unaligned device address {addr}");
        assert_eq!(len, self.page_size, "partial page transfer at {addr}");
        assert!(addr + len as u64 <= self.data.len() as u64, "transfer past end at {addr}");
    }
}

impl PageDevice for FakeDevice {
    type Error = FakeError;

    async fn init(&mut self) -> Result<(), Self::Error> {
        self.ops.push(Op::Init);
        if self.fail_init {
            return Err(FakeError(FAULT_CODE));
        }
        Ok(())
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn total_size(&self) -> u64 {
        self.data.len() as u64
    }

    async fn read(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.check_page(addr, buf.len());
        self.ops.push(Op::Read { addr, len: buf.len() });

        let attempt = self.read_attempts;
        self.read_attempts += 1;
        if self.fail_read == Some(attempt) {
            // Scribble over the buffer like a half-finished transfer would.
            buf.fill(0xEE);
            return Err(FakeError(FAULT_CODE));
        }

        let start = addr as usize;
        buf.copy_from_slice(&self.data[start..start + buf.len()]);
        Ok(())
    }

    async fn program(&mut self, addr: u64, buf: &[u8]) -> Result<(), Self::Error> {
        self.check_page(addr, buf.len());
        self.ops.push(Op::Program { addr, len: buf.len() });

        let attempt = self.program_attempts;
        self.program_attempts += 1;
        if self.fail_program == Some(attempt) {
            return Err(FakeError(FAULT_CODE));
        }

        let start = addr as usize;
        self.data[start..start + buf.len()].copy_from_slice(buf);
        Ok(())
    }
}
