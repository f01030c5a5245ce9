pub struct Utils;

impl Utils {
    /// Classic 16 bytes per line hexdump with an ASCII column.
    pub fn hexdump(data: &[u8]) -> String {
        data.chunks(16)
            .enumerate()
            .map(|(line, chunk)| {
                let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
                let ascii: String = chunk
                    .iter()
                    .map(|&b| if b.is_ascii_graphic() || b == b' ' { char::from(b) } else { '.' })
                    .collect();
                format!("{:08x}  {:<47}  |{}|", line * 16, hex.join(" "), ascii)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Date and time parts of the host's local clock, as sent by `set-date-time`.
    pub fn local_date_time() -> [String; 6] {
        let now = chrono::Local::now();
        [
            now.format("%Y").to_string(),
            now.format("%m").to_string(),
            now.format("%d").to_string(),
            now.format("%H").to_string(),
            now.format("%M").to_string(),
            now.format("%S").to_string(),
        ]
    }
}
