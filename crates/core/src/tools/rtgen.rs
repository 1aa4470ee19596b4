use crate::error::{Error, Result};
use crate::tools::{required, required_number, Tool};

const RTGEN_TUTORIAL: &str =
    "https://docs.google.com/document/d/1oTDlAp708Lrxhs-KwhfX9G3RgNrk2gGa1Xm7KhRnZXg/edit?usp=sharing";

/// Values collected by the rtgen panel. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RtgenForm {
    pub hash_algorithm: String,
    pub charset: String,
    pub plaintext_length_min: String,
    pub plaintext_length_max: String,
    pub table_index: String,
    pub chain_length: String,
    pub chain_count: String,
    pub part_index: String,
}

impl Tool for RtgenForm {
    fn id(&self) -> &'static str {
        "rtgen"
    }

    fn title(&self) -> &'static str {
        "Rtgen"
    }

    fn description(&self) -> &'static str {
        "Rtgen generates rainbow tables. These tables can be used to perform fast hash \
         lookups during password cracking operations."
    }

    fn steps(&self) -> &'static str {
        "=== Required ===\n\
         Step 1: Select the hash algorithm to use (e.g., md5, sha1).\n\
         Step 2: Input the character set used for plaintext generation (e.g., alphanumeric).\n\
         Step 3: Enter the minimum and maximum plaintext length.\n\
         Step 4: Enter the table index, chain length, chain count and part index.\n\
         Step 5: Click Generate. The table is written to the rainbowcrack directory.\n"
    }

    fn source_link(&self) -> &'static str {
        "https://www.kali.org/tools/rainbowcrack/#rtgen"
    }

    fn tutorial(&self) -> Option<&'static str> {
        Some(RTGEN_TUTORIAL)
    }

    fn privilege_elevation(&self) -> bool {
        true
    }

    fn arguments(&self) -> Result<Vec<String>> {
        let hash_algorithm = required("hash algorithm", &self.hash_algorithm)?;
        let charset = required("charset", &self.charset)?;
        let min = required_number("minimum plaintext length", &self.plaintext_length_min)?;
        let max = required_number("maximum plaintext length", &self.plaintext_length_max)?;
        if min > max {
            return Err(Error::InvalidRange(format!(
                "minimum plaintext length {min} is greater than maximum {max}"
            )));
        }

        let table_index = required_number("table index", &self.table_index)?;
        let chain_length = required_number("chain length", &self.chain_length)?;
        let chain_count = required_number("chain count", &self.chain_count)?;
        let part_index = required_number("part index", &self.part_index)?;

        Ok(vec![
            hash_algorithm.to_string(),
            charset.to_string(),
            min.to_string(),
            max.to_string(),
            table_index.to_string(),
            chain_length.to_string(),
            chain_count.to_string(),
            part_index.to_string(),
        ])
    }
}
