use tokio::fs::File;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, BufReader, Lines};

pub type PacketLines = Lines<BufReader<Box<dyn AsyncRead + Unpin + Send>>>;

/// Opens the packet source: a file, or stdin when the path is absent or `-`.
pub async fn open(path: Option<&str>) -> io::Result<PacketLines> {
    let reader: Box<dyn AsyncRead + Unpin + Send> = match path {
        None | Some("-") => Box::new(io::stdin()),
        Some(path) => Box::new(File::open(path).await?),
    };
    Ok(BufReader::new(reader).lines())
}

/// Parses one hex-encoded packet per line.
///
/// Blank lines and `#` comments yield `None`. Whitespace and `:` separators
/// are ignored, so `45 00 00 3c` and `45:00:00:3c` both work.
pub fn parse_hex_line(line: &str) -> Result<Option<Vec<u8>>, hex::FromHexError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let digits: String = line
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(digits).map(Some)
}
