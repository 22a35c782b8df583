use std::fmt;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Result;

use byteorder::LittleEndian;
use byteorder::ReadBytesExt;

/// Width of one packed address record in the trace file.
pub const RECORD_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address(pub u32);

impl Address {
    /// The 4-byte memory reference form: the packed address shifted left one byte.
    pub fn full_reference(self) -> Address {
        Address(self.0 << 8)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Reads the next 3-byte group and reassembles it as a little-endian address.
pub fn process_record<R: Read>(f: &mut R) -> Result<Address> {
    let addr = f.read_u24::<LittleEndian>()?;
    Ok(Address(addr))
}

pub struct Records<R> {
    f: R,
}

impl<R: Read> Records<R> {
    pub fn new(f: R) -> Records<R> {
        Records { f }
    }
}

impl<R: Read> Iterator for Records<R> {
    type Item = Result<Address>;

    fn next(&mut self) -> Option<Result<Address>> {
        match process_record(&mut self.f) {
            Ok(addr) => Some(Ok(addr)),
            Err(err) => {
                // A short final group ends the stream rather than erroring.
                if err.kind() == ErrorKind::UnexpectedEof {
                    None
                } else {
                    Some(Err(err))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reassembles_one_group_little_endian() {
        let mut src = Cursor::new(vec![0x01, 0x02, 0x03]);
        let addr = process_record(&mut src).unwrap();
        assert_eq!(addr, Address(0x0003_0201));
        assert_eq!(addr.to_string(), "00030201");
    }

    #[test]
    fn iterates_every_full_group() {
        let bytes: &[u8] = &[0x00, 0x00, 0x00, 0xff, 0xff, 0xff];
        let addrs = Records::new(bytes).collect::<Result<Vec<Address>>>().unwrap();
        assert_eq!(addrs, vec![Address(0x0000_0000), Address(0x00ff_ffff)]);
    }

    #[test]
    fn stops_before_a_partial_trailing_group() {
        let bytes: &[u8] = &[0x01, 0x02, 0x03, 0x04];
        let addrs = Records::new(bytes).collect::<Result<Vec<Address>>>().unwrap();
        assert_eq!(addrs, vec![Address(0x0003_0201)]);
    }

    #[test]
    fn empty_input_yields_no_records() {
        let bytes: &[u8] = &[];
        assert_eq!(Records::new(bytes).count(), 0);
    }

    #[test]
    fn full_reference_shifts_one_byte() {
        let addr = Address(0x0003_0201);
        assert_eq!(addr.full_reference(), Address(0x0302_0100));
        assert_eq!(addr.full_reference().to_string(), "03020100");
    }
}
