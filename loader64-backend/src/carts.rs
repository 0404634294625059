use std::fmt::{Display, Formatter};
use std::str::FromStr;
use crc::{Crc, CRC_32_ISO_HDLC};
use log::debug;
use num_enum::IntoPrimitive;
use crate::{Error, Result};

pub const CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);


/// A hardware configuration value that can be named on the command line.
///
/// Every kind accepts either its canonical name, or a single digit equal to the variant's
/// discriminant. `NAMES[i]` must be the variant whose discriminant is `OFFSET + i`.
pub trait Identifier: Copy + PartialEq + Into<u8> + 'static {
    /// Used when reporting a value that couldn't be parsed.
    const KIND: &'static str;

    /// Discriminant of the first entry in `NAMES`.
    const OFFSET: u8;

    const NAMES: &'static [(Self, &'static str)];

    fn parse(text: &str) -> Result<Self> {
        let mut chars = text.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let index = c.to_digit(10)
                .and_then(|digit| (digit as u8).checked_sub(Self::OFFSET))
                .and_then(|index| Self::NAMES.get(index as usize));

            if let Some((value, _)) = index {
                return Ok(*value);
            }
        }

        match Self::NAMES.iter().find(|(_, name)| *name == text) {
            Some((value, _)) => Ok(*value),
            None => Err(Error::UnknownIdentifier { kind: Self::KIND, text: text.to_owned() })
        }
    }

    fn name(self) -> &'static str {
        let ordinal: u8 = self.into();
        Self::NAMES[(ordinal - Self::OFFSET) as usize].1
    }
}


#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum CartType {
    SixtyFourDriveHW1 = 1,
    SixtyFourDriveHW2 = 2,
    EverDrive = 3,
    SummerCart64 = 4,
}
impl Identifier for CartType {
    const KIND: &'static str = "flashcart type";
    const OFFSET: u8 = 1;
    const NAMES: &'static [(Self, &'static str)] = &[
        (CartType::SixtyFourDriveHW1, "64Drive HW1"),
        (CartType::SixtyFourDriveHW2, "64Drive HW2"),
        (CartType::EverDrive, "EverDrive"),
        (CartType::SummerCart64, "SC64"),
    ];
}
impl Display for CartType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for CartType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}


#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum CicType {
    Var6101 = 0,
    Var6102 = 1,
    Var7101 = 2,
    Var7102 = 3,
    VarX103 = 4,
    VarX105 = 5,
    VarX106 = 6,
    Var5101 = 7,
}
impl Identifier for CicType {
    const KIND: &'static str = "CIC";
    const OFFSET: u8 = 0;
    const NAMES: &'static [(Self, &'static str)] = &[
        (CicType::Var6101, "6101"),
        (CicType::Var6102, "6102"),
        (CicType::Var7101, "7101"),
        (CicType::Var7102, "7102"),
        (CicType::VarX103, "X103"),
        (CicType::VarX105, "X105"),
        (CicType::VarX106, "X106"),
        (CicType::Var5101, "5101"),
    ];
}
impl Display for CicType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for CicType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
impl CicType {
    /// Attempts to detect which CIC variant matches the provided ROM.
    ///
    /// If ROM does not include standard 0x40 byte header, or is smaller than 0x1000 bytes, this method
    /// will fail.
    pub fn from_rom(data: &[u8]) -> Option<CicType> {
        if data.len() < 0x1000 { return None }

        Self::from_ipl3(&data[0x40..0x1000])
    }

    /// Attempts to detect which CIC variant matches the provided IPL3.
    ///
    /// Data slice should NOT include the ROM header. Only data from rom offset 0x40 to 0x1000 (exclusive).
    pub fn from_ipl3(data: &[u8]) -> Option<CicType> {
        use CicType::*;

        let sum = CRC.checksum(data);
        debug!("Calculated IPL3 CRC: {:#010X}", sum);
        match sum {
            0x6170A4A1 => Some(Var6101),
            0x90BB6CB5 => Some(Var6102),
            0x009E9EA3 => Some(Var7102),
            0x0B050EE0 => Some(VarX103),
            0x98BC2C86 => Some(VarX105),
            0xACC8580A => Some(VarX106),
            _ => None
        }
    }
}


#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum SaveType {
    Eeprom4Kbit = 1,
    Eeprom16Kbit = 2,
    Sram256Kbit = 3,
    FlashRam1Mbit = 4,
    Sram768Kbit = 5,
    FlashRam1MbitStadium = 6,
}
impl Identifier for SaveType {
    const KIND: &'static str = "save type";
    const OFFSET: u8 = 1;
    const NAMES: &'static [(Self, &'static str)] = &[
        (SaveType::Eeprom4Kbit, "EEPROM 4Kbit"),
        (SaveType::Eeprom16Kbit, "EEPROM 16Kbit"),
        (SaveType::Sram256Kbit, "SRAM 256Kbit"),
        (SaveType::FlashRam1Mbit, "FlashRAM 1Mbit"),
        (SaveType::Sram768Kbit, "SRAM 768Kbit"),
        (SaveType::FlashRam1MbitStadium, "FlashRAM 1Mbit (PokeStdm2)"),
    ];
}
impl Display for SaveType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for SaveType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn assert_table_order<T: Identifier>() {
        for (i, (value, _)) in T::NAMES.iter().enumerate() {
            let ordinal: u8 = (*value).into();
            assert_eq!(ordinal, T::OFFSET + i as u8);
        }
    }

    fn assert_names_round_trip<T: Identifier + std::fmt::Debug>() {
        for (value, name) in T::NAMES {
            assert_eq!(value.name(), *name);
            assert_eq!(T::parse(value.name()), Ok(*value));
        }
    }

    fn assert_digits<T: Identifier + std::fmt::Debug>() {
        for (value, _) in T::NAMES {
            let ordinal: u8 = (*value).into();
            let digit = char::from(b'0' + ordinal).to_string();
            assert_eq!(T::parse(&digit), Ok(*value));
        }
    }

    #[test]
    fn test_tables_follow_discriminants() {
        assert_table_order::<CartType>();
        assert_table_order::<CicType>();
        assert_table_order::<SaveType>();
    }

    #[test]
    fn test_parse_canonical_names() {
        assert_names_round_trip::<CartType>();
        assert_names_round_trip::<CicType>();
        assert_names_round_trip::<SaveType>();
    }

    #[test]
    fn test_parse_digit_shorthand() {
        assert_digits::<CartType>();
        assert_digits::<CicType>();
        assert_digits::<SaveType>();
    }

    #[test]
    fn test_cart_digit_is_one_based() {
        assert_eq!(CartType::parse("2"), Ok(CartType::SixtyFourDriveHW2));
        assert_eq!(CartType::SixtyFourDriveHW2.to_string(), "64Drive HW2");
        assert_eq!(CartType::parse("4"), Ok(CartType::SummerCart64));
        assert!(CartType::parse("0").is_err());
        assert!(CartType::parse("5").is_err());
    }

    #[test]
    fn test_cic_digit_is_zero_based() {
        assert_eq!(CicType::parse("0"), Ok(CicType::Var6101));
        assert_eq!(CicType::parse("7"), Ok(CicType::Var5101));
        assert_eq!(CicType::parse("6"), Ok(CicType::VarX106));
        assert!(CicType::parse("8").is_err());
    }

    #[test]
    fn test_save_digit_is_one_based() {
        assert_eq!(SaveType::parse("1"), Ok(SaveType::Eeprom4Kbit));
        assert_eq!(SaveType::parse("6"), Ok(SaveType::FlashRam1MbitStadium));
        assert!(SaveType::parse("0").is_err());
        assert!(SaveType::parse("7").is_err());
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        assert!(CartType::parse("").is_err());
        assert!(CartType::parse("12").is_err());
        assert!(CartType::parse("sc64").is_err());
        assert!(CicType::parse("x103").is_err());
        assert!(CicType::parse("10").is_err());
        assert!(SaveType::parse(" 1").is_err());

        assert_eq!(SaveType::parse("bogus"), Err(Error::UnknownIdentifier {
            kind: "save type",
            text: "bogus".into(),
        }));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("X105".parse::<CicType>(), Ok(CicType::VarX105));
        assert_eq!("EverDrive".parse::<CartType>(), Ok(CartType::EverDrive));
        assert_eq!("SRAM 768Kbit".parse::<SaveType>(), Ok(SaveType::Sram768Kbit));
    }

    #[test]
    fn test_from_rom_too_short() {
        assert_eq!(CicType::from_rom(&[0u8; 0x800]), None);
    }

    #[test]
    fn test_from_ipl3_unknown() {
        assert_eq!(CicType::from_ipl3(&[0u8; 0xFC0]), None);
    }
}
