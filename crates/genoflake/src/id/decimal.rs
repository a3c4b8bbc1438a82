/// Stack buffer holding the base-10 rendering of an `i64`.
///
/// Large enough for `i64::MIN` (sign plus 19 digits).
pub(crate) struct Decimal {
    bytes: [u8; 20],
    start: usize,
}

impl Decimal {
    pub(crate) fn new(value: i64) -> Self {
        let mut bytes = [0u8; 20];
        let mut start = bytes.len();
        let mut n = value.unsigned_abs();

        loop {
            start -= 1;
            bytes[start] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        if value < 0 {
            start -= 1;
            bytes[start] = b'-';
        }

        Self { bytes, start }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[self.start..]
    }
}
