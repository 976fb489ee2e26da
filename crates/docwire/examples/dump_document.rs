//! Simple decoder to inspect docwire files.
//!
//! Accepts undelimited files (`DOCW`/`DOCWZ`) and delimited streams. With
//! `--stream` every record in the file is summarized, otherwise only the first.

use std::fs;

use docwire::{Document, Sentence, Serializer, Tree};

fn preview(text: &str, max: usize) -> String {
    let head: String = text.chars().take(max).collect();
    if text.chars().count() > max {
        format!("\"{}...\"", head)
    } else {
        format!("\"{}\"", head)
    }
}

fn bracketed(tree: &Tree) -> String {
    if tree.is_leaf() {
        return tree.label.clone();
    }
    let children: Vec<String> = tree.children.iter().map(bracketed).collect();
    format!("({} {})", tree.label, children.join(" "))
}

fn describe_sentence(doc: &Document, i: usize, sentence: &Sentence) {
    let tokens = doc.sentence_tokens(sentence).unwrap_or_default();
    println!(
        "[{}] tokens {}..{} {}",
        i,
        sentence.token_offset_begin,
        sentence.token_offset_end,
        preview(sentence.text.as_deref().unwrap_or(""), 60)
    );
    let tagged: Vec<String> = tokens
        .iter()
        .take(12)
        .map(|t| format!("{}/{}", t.word.as_deref().unwrap_or("?"), t.tag.as_deref().unwrap_or("-")))
        .collect();
    println!("      {}", tagged.join(" "));
    if let Some(tree) = &sentence.parse_tree {
        let parse = bracketed(tree);
        println!("      parse: {}", preview(&parse, 100));
    }
    if let Some(graph) = &sentence.basic_dependencies {
        println!(
            "      basic dependencies: {} nodes, {} edges, {} roots",
            graph.nodes.len(),
            graph.edges.len(),
            graph.roots.len()
        );
    }
    if let Some(mentions) = &sentence.entity_mentions {
        println!("      entity mentions: {}", mentions.len());
    }
}

fn describe(doc: &Document) {
    println!("\n=== Document ===");
    if let Some(id) = &doc.doc_id {
        println!("ID: {}", id);
    }
    if let Some(date) = &doc.doc_date {
        println!("Date: {}", date);
    }
    println!("Text: {}", preview(doc.text.as_deref().unwrap_or(""), 80));
    println!("Tokens: {}", doc.tokens.len());
    println!("Sentenceless tokens: {}", doc.sentenceless_positions().len());
    println!("Coref chains: {}", doc.coref_chains.as_ref().map_or(0, Vec::len));
    println!("Quotes: {}", doc.quotes.as_ref().map_or(0, Vec::len));

    println!("\n=== Sentences ({}) ===", doc.sentences.len());
    for (i, sentence) in doc.sentences.iter().enumerate().take(20) {
        describe_sentence(doc, i, sentence);
    }
    if doc.sentences.len() > 20 {
        println!("... and {} more sentences", doc.sentences.len() - 20);
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let mut stream = false;
    let mut path = None;
    for arg in args.by_ref() {
        if arg == "--stream" {
            stream = true;
        } else {
            path = Some(arg);
        }
    }
    let path = path.unwrap_or_else(|| "document.docwz".to_string());

    println!("Reading: {}", path);
    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let serializer = Serializer::relaxed();
    if !stream {
        let doc = serializer.read_undelimited(&data).expect("Failed to decode");
        describe(&doc);
        return;
    }

    let mut reader = data.as_slice();
    let mut count = 0;
    while let (Some(doc), rest) = serializer.read(reader).expect("Failed to decode") {
        describe(&doc);
        reader = rest;
        count += 1;
    }
    println!("\n{} documents", count);
}
