//! WAV encoding and decoding for PCM audio.

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, SeekFrom, Write};
use std::path::Path;

use binrw::{binrw, BinRead, BinWrite};
use wwv_engine::Frame;
use wwv_ir::{Sample, SampleData};

use crate::FormatError;

#[binrw]
#[brw(little)]
#[derive(Debug)]
struct ChunkHeader {
    id: [u8; 4],
    size: u32,
}

#[binrw]
#[brw(little)]
#[derive(Debug)]
struct FmtChunk {
    format_tag: u16,
    channels: u16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
}

const PCM: u16 = 1;

// --- Writing ---

/// Write 16-bit stereo PCM.
pub fn write_wav<W: Write + Seek>(w: &mut W, frames: &[Frame], sample_rate: u32) -> Result<(), FormatError> {
    let channels: u16 = 2;
    let bits_per_sample: u16 = 16;
    let block_align = channels * (bits_per_sample / 8);
    let data_size = frames.len() as u32 * block_align as u32;

    ChunkHeader { id: *b"RIFF", size: 36 + data_size }.write(w)?;
    w.write_all(b"WAVE")?;
    ChunkHeader { id: *b"fmt ", size: 16 }.write(w)?;
    FmtChunk {
        format_tag: PCM,
        channels,
        sample_rate,
        byte_rate: sample_rate * block_align as u32,
        block_align,
        bits_per_sample,
    }
    .write(w)?;
    ChunkHeader { id: *b"data", size: data_size }.write(w)?;

    for frame in frames {
        w.write_all(&frame.left.to_le_bytes())?;
        w.write_all(&frame.right.to_le_bytes())?;
    }
    Ok(())
}

pub fn frames_to_wav(frames: &[Frame], sample_rate: u32) -> Result<Vec<u8>, FormatError> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + frames.len() * 4));
    write_wav(&mut cursor, frames, sample_rate)?;
    Ok(cursor.into_inner())
}

pub fn write_wav_file(path: &Path, frames: &[Frame], sample_rate: u32) -> Result<(), FormatError> {
    let mut w = BufWriter::new(File::create(path)?);
    write_wav(&mut w, frames, sample_rate)?;
    w.flush()?;
    Ok(())
}

// --- Reading ---

/// Load a WAV file from raw bytes into a Sample.
pub fn load_wav(data: &[u8], name: &str) -> Result<Sample, FormatError> {
    let header = parse_header(data)?;
    let sample_data = read_pcm_data(data, &header)?;

    let mut sample = Sample::new(name, header.sample_rate);
    sample.data = sample_data;
    Ok(sample)
}

/// Load a WAV file from disk, named after its file stem.
pub fn load_wav_file(path: &Path) -> Result<Sample, FormatError> {
    let data = std::fs::read(path)?;
    let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    load_wav(&data, name)
}

struct WavHeader {
    num_channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    data_offset: usize,
    data_size: usize,
}

fn parse_header(data: &[u8]) -> Result<WavHeader, FormatError> {
    if data.len() < 44 {
        return Err(FormatError::UnexpectedEof);
    }
    let mut cursor = Cursor::new(data);
    let riff = ChunkHeader::read(&mut cursor)?;
    let form = <[u8; 4]>::read_le(&mut cursor)?;
    if &riff.id != b"RIFF" || &form != b"WAVE" {
        return Err(FormatError::InvalidHeader);
    }

    let mut fmt: Option<FmtChunk> = None;
    let mut data_chunk: Option<(usize, usize)> = None;

    while (cursor.position() as usize) + 8 <= data.len() {
        let chunk = ChunkHeader::read(&mut cursor)?;
        let body = cursor.position();
        let size = chunk.size as u64;

        match &chunk.id {
            b"fmt " if size >= 16 => fmt = Some(FmtChunk::read(&mut cursor)?),
            b"data" => data_chunk = Some((body as usize, chunk.size as usize)),
            _ => {}
        }

        // chunks are word aligned
        let next = body + size + (size & 1);
        cursor.seek(SeekFrom::Start(next))?;
    }

    let fmt = fmt.ok_or(FormatError::InvalidHeader)?;
    let (data_offset, data_size) = data_chunk.ok_or(FormatError::InvalidHeader)?;

    if fmt.format_tag != PCM {
        return Err(FormatError::Unsupported(format!("format tag {}", fmt.format_tag)));
    }
    if fmt.bits_per_sample != 8 && fmt.bits_per_sample != 16 {
        return Err(FormatError::Unsupported(format!("{} bits per sample", fmt.bits_per_sample)));
    }
    if !(1..=2).contains(&fmt.channels) {
        return Err(FormatError::Unsupported(format!("{} channels", fmt.channels)));
    }

    Ok(WavHeader {
        num_channels: fmt.channels,
        sample_rate: fmt.sample_rate,
        bits_per_sample: fmt.bits_per_sample,
        data_offset,
        data_size,
    })
}

fn read_pcm_data(data: &[u8], header: &WavHeader) -> Result<SampleData, FormatError> {
    let end = (header.data_offset + header.data_size).min(data.len());
    let raw = data.get(header.data_offset..end).ok_or(FormatError::UnexpectedEof)?;

    match (header.bits_per_sample, header.num_channels) {
        (8, 1) => Ok(SampleData::Mono8(raw.iter().map(|&b| unsigned_8bit(b)).collect())),
        (8, 2) => {
            let (l, r): (Vec<i8>, Vec<i8>) = raw.chunks_exact(2).map(|c| (unsigned_8bit(c[0]), unsigned_8bit(c[1]))).unzip();
            Ok(SampleData::Stereo8(l, r))
        }
        (16, 1) => Ok(SampleData::Mono16(
            raw.chunks_exact(2).map(|c| i16::from_le_bytes([c[0], c[1]])).collect(),
        )),
        (16, 2) => {
            let (l, r): (Vec<i16>, Vec<i16>) = raw
                .chunks_exact(4)
                .map(|c| (i16::from_le_bytes([c[0], c[1]]), i16::from_le_bytes([c[2], c[3]])))
                .unzip();
            Ok(SampleData::Stereo16(l, r))
        }
        (bits, channels) => Err(FormatError::Unsupported(format!("{bits}-bit {channels}-channel"))),
    }
}

/// WAV 8-bit is unsigned, centered on 128.
fn unsigned_8bit(b: u8) -> i8 {
    (b as i16 - 128) as i8
}
