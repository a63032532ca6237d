//! hotrod-codec CLI
//!
//! Encode fields to hex and decode hex back to fields.

use bytes::Bytes;
use clap::{Parser, Subcommand};
use hotrod_codec::{
    All, BytesWritten, ClientOptions, DecodeOp, Decoded, Decoder, EncodeOp, Encoder, Object,
    Value,
};
use tracing_subscriber::{fmt, EnvFilter};

/// hotrod-codec CLI
#[derive(Parser, Debug)]
#[command(name = "hotrod-codec")]
#[command(about = "Encode and decode Hot Rod wire fields")]
#[command(version)]
struct Args {
    /// Objects are serialized messages (hex payloads) instead of text
    #[arg(short, long)]
    protobuf: bool,

    /// Initial buffer capacity in bytes
    #[arg(short = 'c', long, default_value = "64")]
    capacity: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode fields and print the bytes as hex
    Encode {
        /// Fields: ubyte:N vint:N vlong:N string:TEXT null object:VALUE bytes:HEX
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Decode hex into fields
    Decode {
        /// Encoded bytes as hex
        hex: String,

        /// Kinds: ubyte vint vlong string object bytes:N
        #[arg(required = true)]
        kinds: Vec<String>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,hotrod_codec=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();
    let options = ClientOptions::builder()
        .protobuf(args.protobuf)
        .initial_capacity(args.capacity)
        .build();

    let outcome = match args.command {
        Commands::Encode { fields } => encode(&fields, &options),
        Commands::Decode { hex, kinds } => decode(&hex, &kinds, &options),
    };

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn encode(fields: &[String], options: &ClientOptions) -> Result<(), String> {
    let mut buf = options.new_buffer();
    let mut encoder = Encoder::new(&mut buf, options);
    for field in fields {
        let (op, value) = parse_field(field, options)?;
        encoder = encoder.field(op, value);
    }

    let written = encoder.run(BytesWritten).map_err(|e| e.to_string())?;
    tracing::info!("{} bytes written", written);
    println!("{}", to_hex(buf.as_slice()));
    Ok(())
}

fn decode(hex: &str, kinds: &[String], options: &ClientOptions) -> Result<(), String> {
    let mut buf = hotrod_codec::ByteBuf::from(parse_hex(hex)?);
    let mut decoder = Decoder::new(&mut buf, options);
    for kind in kinds {
        decoder = decoder.field(parse_kind(kind)?);
    }

    match decoder.run(All).map_err(|e| e.to_string())? {
        Some(fields) => fields.iter().for_each(|f| println!("{}", describe(f))),
        None => println!("incomplete"),
    }
    Ok(())
}

// =============================================================================
// Argument parsing
// =============================================================================

fn parse_field(field: &str, options: &ClientOptions) -> Result<(EncodeOp, Value), String> {
    if field == "null" {
        return Ok((EncodeOp::String, Value::Null));
    }

    let (kind, raw) = field
        .split_once(':')
        .ok_or_else(|| format!("Expected kind:value, got '{}'", field))?;

    let number = || {
        raw.parse::<i64>()
            .map(Value::Int)
            .map_err(|_| format!("Not an integer: '{}'", raw))
    };

    match kind {
        "ubyte" => Ok((EncodeOp::UByte, number()?)),
        "vint" => Ok((EncodeOp::VInt, number()?)),
        "vlong" => Ok((EncodeOp::VLong, number()?)),
        "string" => Ok((EncodeOp::String, Value::from(raw))),
        "bytes" => Ok((EncodeOp::Bytes, Value::from(parse_hex(raw)?))),
        "object" if options.protobuf => Ok((
            EncodeOp::Object,
            Value::Object(Object::Opaque(Bytes::from(parse_hex(raw)?))),
        )),
        "object" => Ok((EncodeOp::Object, Value::Object(Object::text(raw)))),
        other => Err(format!("Unknown field kind: '{}'", other)),
    }
}

fn parse_kind(kind: &str) -> Result<DecodeOp, String> {
    match kind {
        "ubyte" => Ok(DecodeOp::UByte),
        "vint" => Ok(DecodeOp::VInt),
        "vlong" => Ok(DecodeOp::VLong),
        "string" => Ok(DecodeOp::String),
        "object" => Ok(DecodeOp::Object),
        _ => match kind.strip_prefix("bytes:") {
            Some(len) => len
                .parse()
                .map(DecodeOp::Bytes)
                .map_err(|_| format!("Not a length: '{}'", len)),
            None => Err(format!("Unknown field kind: '{}'", kind)),
        },
    }
}

// =============================================================================
// Hex helpers
// =============================================================================

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn parse_hex(hex: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<char> = hex.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(format!("Odd number of hex digits in '{}'", hex));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let byte: String = pair.iter().collect();
            u8::from_str_radix(&byte, 16).map_err(|_| format!("Invalid hex byte '{}'", byte))
        })
        .collect()
}

fn describe(field: &Decoded) -> String {
    match field {
        Decoded::UByte(n) => format!("ubyte {}", n),
        Decoded::VInt(n) => format!("vint {}", n),
        Decoded::VLong(n) => format!("vlong {}", n),
        Decoded::String(s) => format!("string {:?}", s),
        Decoded::Bytes(b) => format!("bytes {}", to_hex(b)),
        Decoded::Object(Object::Text(s)) => format!("object {:?}", s),
        Decoded::Object(Object::Opaque(b)) => format!("object {}", to_hex(b)),
    }
}
