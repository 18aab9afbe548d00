//! Subcommand implementations; each returns the text to print

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use ethereum_types::U256;
use std::fs;
use std::io::Read;
use tracing::{debug, info};
use ucs03_codec::{
    decode_instruction_with, encode_instruction, encode_packet, registry, Bytes, ChannelPath,
    DecodeLimits, Instruction, Packet,
};

pub fn decode(hex: &str, packet: bool, raw: bool, limits: &DecodeLimits) -> Result<String> {
    let bytes: Bytes = hex.trim().parse().context("Input is not valid hex")?;
    info!(len = bytes.len(), packet, "decoding");

    let json = if packet {
        let packet = if raw {
            Packet::decode_raw(&bytes)
        } else {
            Packet::decode_with(&bytes, limits)
        }
        .context("Failed to decode packet")?;
        serde_json::to_string_pretty(&packet)?
    } else {
        let instruction =
            decode_instruction_with(&bytes, limits).context("Failed to decode instruction")?;
        serde_json::to_string_pretty(&instruction)?
    };
    Ok(json)
}

pub fn encode(json: &str, packet: bool) -> Result<String> {
    let bytes = if packet {
        let packet: Packet = serde_json::from_str(json).context("Input is not a packet")?;
        encode_packet(&packet).context("Failed to encode packet")?
    } else {
        let instruction: Instruction =
            serde_json::from_str(json).context("Input is not an instruction")?;
        debug!(instruction = instruction.name(), "encoding");
        encode_instruction(&instruction).context("Failed to encode instruction")?
    };
    Ok(Bytes::from(bytes).to_hex())
}

/// Read a file, or stdin for `-`
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
    }
}

pub fn pack_path(hops: &[u32]) -> Result<String> {
    let path = ChannelPath::from_hops(hops)?;
    Ok(format!("{:#x}", path.as_u256()))
}

pub fn unpack_path(value: &str) -> Result<String> {
    let value = value.trim();
    let raw = match value.strip_prefix("0x") {
        Some(digits) => U256::from_str_radix(digits, 16)
            .map_err(|e| anyhow!("Invalid hex path {value}: {e}"))?,
        None => U256::from_dec_str(value).map_err(|e| anyhow!("Invalid path {value}: {e}"))?,
    };
    let path = ChannelPath::new(raw);
    if path.is_empty() {
        return Ok("(empty)".to_string());
    }
    Ok(path.to_string())
}

pub fn opcodes() -> String {
    let mut lines = vec![format!(
        "{:<8} {:<7} {}",
        "version".bold(),
        "opcode".bold(),
        "instruction".bold()
    )];
    for entry in registry::entries() {
        lines.push(format!(
            "{:<8} {:<7} {}",
            entry.version,
            u8::from(entry.opcode),
            entry.name.green()
        ));
    }
    lines.join("\n")
}
