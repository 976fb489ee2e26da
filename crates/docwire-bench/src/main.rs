//! Size and speed report for docwire over a corpus of annotated documents.
//!
//! Reads a JSON corpus when a path is given, otherwise synthesizes one:
//!
//! ```json
//! [{"id": "d1", "text": "...", "sentences": [{"tokens": [
//!     {"word": "Apple", "tag": "NNP", "lemma": "Apple", "ner": "ORGANIZATION",
//!      "head": 2, "rel": "nsubj", "before": ""}
//! ]}]}]
//! ```
//!
//! `head` is 1-based within the sentence, 0 marks the root.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use docwire::{
    CorefChain, CorefMention, DependencyGraph, Document, Edge, EntityMention, Mention, NodeKey,
    Serializer, Token, Tree,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// =============================================================================
// JSON CORPUS
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct CorpusDocument {
    id: String,
    text: String,
    sentences: Vec<CorpusSentence>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CorpusSentence {
    tokens: Vec<CorpusToken>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CorpusToken {
    word: String,
    tag: Option<String>,
    lemma: Option<String>,
    ner: Option<String>,
    head: Option<u32>,
    rel: Option<String>,
    before: Option<String>,
}

// =============================================================================
// SYNTHETIC CORPUS
// =============================================================================

const SUBJECTS: &[(&str, &str, &str)] = &[
    ("Apple", "NNP", "ORGANIZATION"),
    ("Paris", "NNP", "CITY"),
    ("Marie", "NNP", "PERSON"),
    ("Stanford", "NNP", "ORGANIZATION"),
    ("Kenya", "NNP", "COUNTRY"),
];

const VERBS: &[(&str, &str, &str)] = &[
    ("is", "VBZ", "be"),
    ("remains", "VBZ", "remain"),
    ("became", "VBD", "become"),
];

const OBJECTS: &[(&str, &str)] = &[
    ("company", "NN"),
    ("city", "NN"),
    ("scientist", "NN"),
    ("university", "NN"),
    ("country", "NN"),
];

fn synth_token(word: &str, tag: &str, lemma: &str, ner: &str, head: u32, rel: &str, before: &str) -> CorpusToken {
    CorpusToken {
        word: word.to_string(),
        tag: Some(tag.to_string()),
        lemma: Some(lemma.to_string()),
        ner: Some(ner.to_string()),
        head: Some(head),
        rel: Some(rel.to_string()),
        before: Some(before.to_string()),
    }
}

/// Documents of "<Subject> <verb> a <object>." sentences, picked
/// deterministically from the document and sentence position.
fn synthesize(count: usize, sentences_per_doc: usize) -> Vec<CorpusDocument> {
    let mut docs = Vec::with_capacity(count);
    for d in 0..count {
        let mut sentences = Vec::with_capacity(sentences_per_doc);
        let mut text = String::new();
        for s in 0..sentences_per_doc {
            let seed = d * 31 + s * 7;
            let (subj, subj_tag, subj_ner) = SUBJECTS[seed % SUBJECTS.len()];
            let (verb, verb_tag, verb_lemma) = VERBS[seed % VERBS.len()];
            let (obj, obj_tag) = OBJECTS[(seed / 3) % OBJECTS.len()];
            let lead = if s == 0 { "" } else { " " };

            let tokens = vec![
                synth_token(subj, subj_tag, subj, subj_ner, 4, "nsubj", lead),
                synth_token(verb, verb_tag, verb_lemma, "O", 4, "cop", " "),
                synth_token("a", "DT", "a", "O", 4, "det", " "),
                synth_token(obj, obj_tag, obj, "O", 0, "root", " "),
                synth_token(".", ".", ".", "O", 4, "punct", ""),
            ];
            for token in &tokens {
                text.push_str(token.before.as_deref().unwrap_or(""));
                text.push_str(&token.word);
            }
            sentences.push(CorpusSentence { tokens });
        }
        docs.push(CorpusDocument {
            id: format!("synthetic-{d}"),
            text,
            sentences,
        });
    }
    docs
}

// =============================================================================
// CONVERSION TO DOCWIRE
// =============================================================================

fn build_graph(tokens: &[CorpusToken], sentence_index: u32) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for i in 1..=tokens.len() as u32 {
        graph.add_node(NodeKey::new(i, sentence_index));
    }
    for (i, token) in tokens.iter().enumerate() {
        let dependent = NodeKey::new(i as u32 + 1, sentence_index);
        match token.head {
            Some(0) => graph.add_root(dependent),
            Some(head) if head as usize <= tokens.len() => {
                let rel = token.rel.clone().unwrap_or_else(|| "dep".to_string());
                graph.add_edge(Edge::new(NodeKey::new(head, sentence_index), dependent, rel));
            }
            _ => {}
        }
    }
    graph
}

fn build_tree(tokens: &[CorpusToken]) -> Tree {
    let preterminals = tokens
        .iter()
        .map(|t| {
            let tag = t.tag.clone().unwrap_or_else(|| "X".to_string());
            Tree::node(tag, vec![Tree::leaf(t.word.clone())])
        })
        .collect();
    Tree::node("ROOT", vec![Tree::node("S", preterminals)])
}

/// Contiguous runs of the same non-`O` NER label.
fn ner_spans(tokens: &[CorpusToken]) -> Vec<(u32, u32, String)> {
    let mut spans: Vec<(u32, u32, String)> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        let Some(ner) = token.ner.as_deref().filter(|n| *n != "O") else {
            continue;
        };
        let i = i as u32;
        match spans.last_mut() {
            Some((_, end, label)) if *end == i && label == ner => *end = i + 1,
            _ => spans.push((i, i + 1, ner.to_string())),
        }
    }
    spans
}

fn to_document(corpus: &CorpusDocument) -> Document {
    let mut doc = Document::new(corpus.text.clone());
    doc.doc_id = Some(corpus.id.clone());

    let mut entities = Vec::new();
    let mut chain = CorefChain {
        chain_id: 1,
        mentions: Vec::new(),
        representative: Some(0),
    };
    let mut next_mention = 1;

    for (s, sentence) in corpus.sentences.iter().enumerate() {
        let tokens = sentence
            .tokens
            .iter()
            .map(|t| {
                let mut token = Token::new(t.word.clone());
                token.tag = t.tag.clone();
                token.lemma = t.lemma.clone();
                token.ner = t.ner.clone();
                token.before = t.before.clone();
                token.sentence_index = Some(s as u32);
                token
            })
            .collect();

        let spans = ner_spans(&sentence.tokens);
        let out = doc.push_sentence(tokens);
        out.parse_tree = Some(build_tree(&sentence.tokens));
        out.basic_dependencies = Some(build_graph(&sentence.tokens, s as u32));

        let mut mentions = Vec::with_capacity(spans.len());
        for (begin, end, label) in spans {
            entities.push(EntityMention {
                sentence_index: Some(s as u32),
                token_begin: begin,
                token_end: end,
                ner: Some(label),
                ..Default::default()
            });
            mentions.push(Mention::new(next_mention, begin, end));
            chain.mentions.push(CorefMention {
                mention_id: next_mention,
                begin_index: begin,
                end_index: end,
                sentence_index: s as u32,
                ..Default::default()
            });
            next_mention += 1;
        }
        out.mentions_for_coref = Some(mentions);
    }

    doc.entity_mentions = Some(entities);
    if !chain.mentions.is_empty() {
        doc.coref_chains = Some(vec![chain]);
    }
    doc
}

// =============================================================================
// REPORT
// =============================================================================

#[derive(Debug, Serialize)]
struct Report {
    documents: usize,
    tokens: usize,
    json_bytes: usize,
    delimited_bytes: usize,
    compressed_bytes: usize,
    encode_ms: f64,
    decode_ms: f64,
    compress_ms: f64,
    decode_compressed_ms: f64,
}

fn mb_per_s(bytes: usize, time: Duration) -> f64 {
    (bytes as f64 / 1_000_000.0) / time.as_secs_f64()
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let corpus: Vec<CorpusDocument> = match std::env::args().nth(1) {
        Some(path) => {
            let data = fs::read_to_string(&path).expect("Failed to read corpus");
            serde_json::from_str(&data).expect("Failed to parse corpus")
        }
        None => {
            warn!("no corpus given, synthesizing one");
            synthesize(2_000, 12)
        }
    };
    let json_bytes = serde_json::to_vec(&corpus).expect("Failed to serialize corpus").len();

    let convert_start = Instant::now();
    let docs: Vec<Document> = corpus.iter().map(to_document).collect();
    let token_count: usize = docs.iter().map(|d| d.tokens.len()).sum();
    info!(
        documents = docs.len(),
        tokens = token_count,
        elapsed = ?convert_start.elapsed(),
        "built documents"
    );

    let serializer = Serializer::strict();

    // Delimited stream, every document back to back
    let encode_start = Instant::now();
    let mut stream = Vec::new();
    for doc in &docs {
        stream = serializer.write(doc, stream).expect("Failed to encode");
    }
    let encode_time = encode_start.elapsed();

    println!("\nDelimited stream: {} bytes in {:?}", stream.len(), encode_time);
    println!("  Throughput: {:.2} MB/s", mb_per_s(stream.len(), encode_time));

    let decode_start = Instant::now();
    let mut reader = stream.as_slice();
    let mut decoded = 0;
    loop {
        let (doc, rest) = serializer.read(reader).expect("Failed to decode");
        reader = rest;
        match doc {
            Some(_) => decoded += 1,
            None => break,
        }
    }
    let decode_time = decode_start.elapsed();
    assert_eq!(decoded, docs.len());

    println!("\nDecode (delimited): {:?}", decode_time);
    println!("  Throughput: {:.2} MB/s", mb_per_s(stream.len(), decode_time));

    // One compressed file per document
    let compress_start = Instant::now();
    let files: Vec<Vec<u8>> = docs
        .iter()
        .map(|doc| serializer.to_undelimited_compressed(doc, 3).expect("Failed to compress"))
        .collect();
    let compress_time = compress_start.elapsed();
    let compressed_bytes: usize = files.iter().map(Vec::len).sum();

    println!("\nCompressed (level 3): {} bytes in {:?}", compressed_bytes, compress_time);
    println!(
        "  Compression ratio: {:.1}x",
        stream.len() as f64 / compressed_bytes as f64
    );

    let decode_compressed_start = Instant::now();
    for (file, doc) in files.iter().zip(&docs) {
        let back = serializer.read_undelimited(file).expect("Failed to decode compressed");
        assert_eq!(back.tokens.len(), doc.tokens.len());
    }
    let decode_compressed_time = decode_compressed_start.elapsed();

    println!("\nDecode (compressed): {:?}", decode_compressed_time);
    println!(
        "  Throughput: {:.2} MB/s (uncompressed equivalent)",
        mb_per_s(stream.len(), decode_compressed_time)
    );

    println!("\n=== Summary ===");
    println!("Documents: {}", docs.len());
    println!("Tokens: {}", token_count);
    println!(
        "Size vs JSON: {:.1}% (delimited), {:.1}% (compressed)",
        100.0 * stream.len() as f64 / json_bytes as f64,
        100.0 * compressed_bytes as f64 / json_bytes as f64
    );

    let report = Report {
        documents: docs.len(),
        tokens: token_count,
        json_bytes,
        delimited_bytes: stream.len(),
        compressed_bytes,
        encode_ms: encode_time.as_secs_f64() * 1000.0,
        decode_ms: decode_time.as_secs_f64() * 1000.0,
        compress_ms: compress_time.as_secs_f64() * 1000.0,
        decode_compressed_ms: decode_compressed_time.as_secs_f64() * 1000.0,
    };
    let report_json = serde_json::to_string_pretty(&report).expect("Failed to serialize report");

    if let Some(path) = std::env::args().nth(2) {
        fs::write(Path::new(&path), &report_json).expect("Failed to write report");
        info!(%path, "wrote report");
    } else {
        println!("\n{report_json}");
    }
}
