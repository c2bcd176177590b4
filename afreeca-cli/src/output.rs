use crate::{cli::OutputFormat, error::Result};
use afreeca_parser::media::{MediaInfo, StreamInfo};
#[cfg(feature = "colored-output")]
use colored::*;
use std::borrow::Cow;
use std::io::Write;
#[cfg(feature = "table-output")]
use tabled::{Table, Tabled, settings::Style};

pub struct OutputManager {
    #[cfg_attr(not(feature = "colored-output"), allow(dead_code))]
    colored: bool,
}

impl OutputManager {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn format_media_info(&self, media_info: &MediaInfo, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(self.format_pretty(media_info)),
            OutputFormat::Json => self.format_json(media_info, true),
            OutputFormat::JsonCompact => self.format_json(media_info, false),
            #[cfg(feature = "table-output")]
            OutputFormat::Table => Ok(self.format_table(media_info)),
            #[cfg(not(feature = "table-output"))]
            OutputFormat::Table => {
                // Fallback to pretty format when table feature is disabled
                Ok(self.format_pretty(media_info))
            }
            OutputFormat::Csv => Ok(self.format_csv(media_info)),
        }
    }

    fn format_pretty(&self, media_info: &MediaInfo) -> String {
        let mut output = String::new();

        output.push_str(&self.colorize("Channel Information:", &Color::Green, true));
        output.push('\n');
        output.push_str(&format!(
            "  {}: {}\n",
            self.colorize("Channel", &Color::Yellow, false),
            self.colorize(&media_info.artist, &Color::Cyan, false)
        ));
        output.push_str(&format!(
            "  {}: {}\n",
            self.colorize("Page", &Color::Yellow, false),
            self.colorize(&media_info.site_url, &Color::Blue, false)
        ));
        output.push_str(&format!(
            "  {}: {}\n",
            self.colorize("Live", &Color::Yellow, false),
            self.colorize(&media_info.is_live.to_string(), &Color::Cyan, false)
        ));

        if !media_info.streams.is_empty() {
            output.push('\n');
            output.push_str(&self.colorize("Streams:", &Color::Green, true));
            output.push('\n');
            for stream in &media_info.streams {
                output.push_str(&self.format_stream_pretty(stream));
            }
        }

        if let Some(headers) = &media_info.headers
            && !headers.is_empty()
        {
            output.push('\n');
            output.push_str(&self.colorize("Headers:", &Color::Green, true));
            output.push('\n');
            let mut headers: Vec<_> = headers.iter().collect();
            headers.sort();
            for (key, value) in headers {
                output.push_str(&format!(
                    "  {}: {}\n",
                    self.colorize(key, &Color::Yellow, false),
                    self.colorize(value, &Color::Cyan, false)
                ));
            }
        }

        output
    }

    fn format_stream_pretty(&self, stream: &StreamInfo) -> String {
        format!(
            "  {} ({}, {}): {}\n",
            self.colorize(&stream.quality, &Color::Yellow, true),
            stream.priority,
            stream.weight_group,
            self.colorize(&stream.url(), &Color::Blue, false)
        )
    }

    fn format_json(&self, media_info: &MediaInfo, pretty: bool) -> Result<String> {
        let media_data = serde_json::to_value(media_info)?;
        let output_data = serde_json::json!({ "status": "ok", "media": media_data });

        let mut json = if pretty {
            serde_json::to_string_pretty(&output_data)
        } else {
            serde_json::to_string(&output_data)
        }?;
        json.push('\n');
        Ok(json)
    }

    #[cfg(feature = "table-output")]
    fn format_table(&self, media_info: &MediaInfo) -> String {
        #[derive(Tabled)]
        struct StreamTableRow<'a> {
            quality: &'a str,
            weight: u32,
            url: String,
        }

        let rows = media_info.streams.iter().map(|stream| StreamTableRow {
            quality: &stream.quality,
            weight: stream.priority,
            url: stream.url(),
        });

        let mut table = Table::new(rows).with(Style::modern()).to_string();
        table.push('\n');
        table
    }

    fn format_csv(&self, media_info: &MediaInfo) -> String {
        let mut output = String::from("channel,is_live,quality,weight,url\n");
        for stream in &media_info.streams {
            let url = stream.url();
            let row = [
                Self::escape_csv(&media_info.artist),
                Cow::Owned(media_info.is_live.to_string()),
                Self::escape_csv(&stream.quality),
                Cow::Owned(stream.priority.to_string()),
                Self::escape_csv(&url),
            ];
            output.push_str(&row.join(","));
            output.push('\n');
        }
        output
    }

    fn escape_csv(s: &str) -> Cow<'_, str> {
        if s.contains(['"', ',', '\n']) {
            Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(s)
        }
    }

    fn colorize(&self, text: &str, color: &Color, bold: bool) -> String {
        #[cfg(feature = "colored-output")]
        {
            if self.colored {
                let colored_text = match color {
                    Color::Green => text.green(),
                    Color::Yellow => text.yellow(),
                    Color::Blue => text.blue(),
                    Color::Cyan => text.cyan(),
                };
                if bold {
                    colored_text.bold().to_string()
                } else {
                    colored_text.to_string()
                }
            } else {
                text.to_string()
            }
        }

        #[cfg(not(feature = "colored-output"))]
        {
            let _ = (color, bold);
            text.to_string()
        }
    }
}

enum Color {
    Green,
    Yellow,
    Blue,
    Cyan,
}

pub fn write_output(content: &str, output_file: Option<&std::path::Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        None => {
            print!("{content}");
            std::io::stdout().flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use afreeca_parser::media::StreamHandle;
    use url::Url;

    fn media_info() -> MediaInfo {
        let handle = StreamHandle::new(Url::parse("http://relay.example/live/a.m3u8").unwrap())
            .with_param("aid", "k");
        MediaInfo::builder("https://play.afreecatv.com/someuser", "someuser")
            .is_live(true)
            .streams(vec![
                StreamInfo::new("original", 1080, "afreeca", handle.clone()),
                StreamInfo::new("hd", 720, "afreeca", handle),
            ])
            .build()
    }

    #[test]
    fn pretty_lists_streams_in_order() {
        let output = OutputManager::new(false)
            .format_media_info(&media_info(), &OutputFormat::Pretty)
            .unwrap();
        let original = output.find("original (1080, afreeca)").unwrap();
        let hd = output.find("hd (720, afreeca)").unwrap();
        assert!(original < hd);
        assert!(output.contains("http://relay.example/live/a.m3u8?aid=k"));
    }

    #[test]
    fn json_wraps_media() {
        let output = OutputManager::new(false)
            .format_media_info(&media_info(), &OutputFormat::JsonCompact)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["media"]["artist"], "someuser");
        assert_eq!(value["media"]["streams"][1]["quality"], "hd");
        assert_eq!(value["media"]["streams"][0]["handle"]["params"]["aid"], "k");
    }

    #[test]
    fn csv_has_one_row_per_stream() {
        let output = OutputManager::new(false)
            .format_media_info(&media_info(), &OutputFormat::Csv)
            .unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "someuser,true,original,1080,http://relay.example/live/a.m3u8?aid=k"
        );
    }

    #[test]
    fn escape_csv_quotes_when_needed() {
        assert_eq!(OutputManager::escape_csv("plain"), "plain");
        assert_eq!(OutputManager::escape_csv("a,b"), "\"a,b\"");
        assert_eq!(OutputManager::escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
