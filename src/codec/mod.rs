use std::fs;

use crate::bitstreams::{BinaryReader, BinaryWriterBuilder};
use crate::error::CodecError;
use crate::huffman::{build_histogram, CodeTable, DecodeNode, HuffTree};
use crate::properties::Properties;
use crate::raster::Raster;
use crate::ImmutableImage;

/// Extension of the binary artifact.
pub const ENCODED_EXTENSION: &str = "vh";
/// Extension of the config artifact.
pub const CONFIG_EXTENSION: &str = "config";

/// A compressed image: the packed bitstream plus the config needed to decode
/// it. The stream layout is an 8-bit padding-count header, one codeword per
/// sample in row-major, channel-minor order, and `padding` zero filler bits.
pub struct EncodedImage {
    pub bytes: Box<[u8]>,
    pub properties: Properties,
}

impl EncodedImage {
    pub fn encode(raster: &Raster) -> EncodedImage {
        let histogram = build_histogram(raster);
        let table = match HuffTree::build(&histogram) {
            Some(tree) => {
                debug_assert_eq!(tree.weight(), raster.num_samples());
                CodeTable::from_tree(&tree)
            }
            None => CodeTable::default(),
        };

        // The codeword lengths and the histogram fix the payload size, so the
        // padding header can be emitted before the payload itself.
        let body_bits: usize = table
            .iter()
            .map(|(symbol, code)| histogram[symbol as usize] * code.len())
            .sum();
        let padding = 8 - body_bits % 8;

        let mut writer = BinaryWriterBuilder::new();
        writer.push_bits(padding as u64, 8);

        for &sample in raster.samples() {
            let code = table.get(sample);
            debug_assert!(code.is_some(), "symbol {sample} has no codeword");
            for bit in code.unwrap().bytes() {
                writer.push_bit(bit == b'1');
            }
        }

        for _ in 0..padding {
            writer.push_bit(false);
        }

        let properties = Properties {
            width: raster.width(),
            height: raster.height(),
            channels: raster.channels(),
            codes: table.into_codes(),
        };

        EncodedImage { bytes: writer.build().os, properties }
    }

    /// Rebuilds the sample array. The padding-count header is honored: symbol
    /// matching starts right after it and never consumes the filler bits.
    pub fn decode(&self) -> Result<Raster, CodecError> {
        let expected = self.properties.num_samples();

        if expected > 0 && self.properties.codes.is_empty() {
            return Err(CodecError::ConfigFormat {
                message: "config carries no codewords".to_string(),
            });
        }

        let decode_tree = DecodeNode::from_codes(&self.properties.codes)?;

        let mut reader = BinaryReader::new(self.bytes.clone());
        let total_bits = reader.len_bits();

        let padding = reader
            .read_int(8)
            .ok_or(CodecError::StreamTooShort { expected, decoded: 0 })? as usize;
        if 8 + padding > total_bits {
            return Err(CodecError::StreamTooShort { expected, decoded: 0 });
        }
        let bit_budget = total_bits - padding;

        let mut samples = Vec::with_capacity(expected);
        while samples.len() < expected {
            let mut node = &decode_tree;
            let symbol_start = reader.read_bits;

            loop {
                match node {
                    DecodeNode::Leaf(symbol) => {
                        samples.push(*symbol);
                        break;
                    }
                    DecodeNode::Vacant => {
                        return Err(CodecError::UnmatchedCode { bit_offset: reader.read_bits });
                    }
                    DecodeNode::Branch { left, right } => {
                        if reader.read_bits >= bit_budget {
                            return Err(if reader.read_bits == symbol_start {
                                CodecError::StreamTooShort { expected, decoded: samples.len() }
                            } else {
                                CodecError::UnmatchedCode { bit_offset: reader.read_bits }
                            });
                        }

                        let bit = reader
                            .read_bit()
                            .ok_or(CodecError::StreamTooShort { expected, decoded: samples.len() })?;
                        node = if bit == 1 { left.as_ref() } else { right.as_ref() };
                    }
                }
            }
        }

        Raster::new(
            self.properties.width,
            self.properties.height,
            self.properties.channels,
            samples,
        )
    }

    /// Writes `<basename>.vh` and `<basename>.config`. Both artifacts are
    /// already materialized in memory, so each write is all-or-nothing.
    pub fn store(&self, basename: &str) -> std::io::Result<()> {
        fs::write(format!("{basename}.{ENCODED_EXTENSION}"), &self.bytes)?;
        fs::write(
            format!("{basename}.{CONFIG_EXTENSION}"),
            String::from(&self.properties),
        )
    }

    pub fn load(basename: &str) -> Result<EncodedImage, CodecError> {
        let bytes = fs::read(format!("{basename}.{ENCODED_EXTENSION}"))?;
        let config = fs::read_to_string(format!("{basename}.{CONFIG_EXTENSION}"))?;

        EncodedImage::from_parts(bytes, &config)
    }

    pub fn from_parts(bytes: Vec<u8>, config: &str) -> Result<EncodedImage, CodecError> {
        Ok(EncodedImage {
            bytes: bytes.into_boxed_slice(),
            properties: config.parse()?,
        })
    }
}
