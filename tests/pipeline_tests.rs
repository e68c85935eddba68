//! Pipeline behavior tests: append accounting, input rejection, the
//! single-flight gate, and failure handling with stubbed service clients.

mod common;

use std::sync::Arc;

use common::mocks::{MockEmbeddings, MockGeneration, MockVectorStore};
use rstest::rstest;
use scos_assist::config::RetrievalConfig;
use scos_assist::db::VectorStore;
use scos_assist::llm::GenerationClient;
use scos_assist::rag::embeddings::EmbeddingClient;
use scos_assist::types::{MessageRole, GENERIC_ERROR_REPLY};
use scos_assist::{RagPipeline, Session};

fn build_pipeline(
    embeddings: Arc<dyn EmbeddingClient>,
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn GenerationClient>,
) -> RagPipeline {
    RagPipeline::new(
        embeddings,
        store,
        llm,
        RetrievalConfig::default(),
        Arc::new(Session::new()),
    )
}

#[tokio::test]
async fn answer_appends_exactly_one_message() {
    let canned =
        "**Multiplication basics.**\n\n---\n### Supporting Standards\n**[3.OA.1]** Interpret \
         products of whole numbers.";
    let store = MockVectorStore::with_passages(&[("passage one", 0.81), ("passage two", 0.45)]);
    let pipeline = build_pipeline(
        Arc::new(MockEmbeddings::new()),
        Arc::new(store),
        Arc::new(MockGeneration::new(canned)),
    );

    let before = pipeline.session().len();
    let message = pipeline
        .answer("What are the multiplication standards?")
        .await
        .expect("valid question must produce a message");

    assert_eq!(message.role, MessageRole::Assistant);
    assert_eq!(message.content, canned);
    assert_eq!(pipeline.session().len(), before + 1);
    assert_eq!(
        pipeline.session().messages().last().unwrap().content,
        canned
    );
    assert!(!pipeline.session().is_busy());
}

#[rstest]
#[case::empty("")]
#[case::spaces("   ")]
#[case::newlines("\n\t ")]
#[tokio::test]
async fn blank_questions_are_ignored(#[case] question: &str) {
    let pipeline = build_pipeline(
        Arc::new(MockEmbeddings::new()),
        Arc::new(MockVectorStore::empty()),
        Arc::new(MockGeneration::new("unused")),
    );

    let before = pipeline.session().len();
    assert!(pipeline.answer(question).await.is_none());
    assert_eq!(pipeline.session().len(), before);
    assert!(!pipeline.session().is_busy());
}

#[tokio::test]
async fn second_call_while_busy_is_ignored() {
    let pipeline = build_pipeline(
        Arc::new(MockEmbeddings::new()),
        Arc::new(MockVectorStore::empty()),
        Arc::new(MockGeneration::new("answer")),
    );

    pipeline.session().set_busy(true);
    let before = pipeline.session().len();
    assert!(pipeline.answer("a real question").await.is_none());
    assert_eq!(pipeline.session().len(), before);

    // once the gate clears the same question goes through
    pipeline.session().set_busy(false);
    assert!(pipeline.answer("a real question").await.is_some());
    assert_eq!(pipeline.session().len(), before + 1);
}

#[tokio::test]
async fn empty_retrieval_uses_the_fallback_context() {
    let llm = Arc::new(MockGeneration::new("answer"));
    let pipeline = build_pipeline(
        Arc::new(MockEmbeddings::new()),
        Arc::new(MockVectorStore::empty()),
        llm.clone(),
    );

    pipeline.answer("anything indexed?").await.unwrap();

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Context:\nNo relevant context found."));
}

#[tokio::test]
async fn prompt_preserves_passage_ranking_order() {
    let llm = Arc::new(MockGeneration::new("answer"));
    let store = MockVectorStore::with_passages(&[("A", 0.9), ("B", 0.5)]);
    let pipeline = build_pipeline(Arc::new(MockEmbeddings::new()), Arc::new(store), llm.clone());

    pipeline.answer("ordering?").await.unwrap();

    let prompts = llm.prompts();
    assert!(prompts[0].contains("Context:\nA\n\nB"));
    assert!(prompts[0].contains("Question: ordering?"));
}

#[tokio::test]
async fn embedding_failure_appends_the_generic_reply() {
    let pipeline = build_pipeline(
        Arc::new(MockEmbeddings::failing()),
        Arc::new(MockVectorStore::empty()),
        Arc::new(MockGeneration::new("unused")),
    );

    let before = pipeline.session().len();
    let message = pipeline.answer("question").await.unwrap();

    assert_eq!(message.content, GENERIC_ERROR_REPLY);
    assert_eq!(pipeline.session().len(), before + 1);
    assert!(!pipeline.session().is_busy());
}

#[tokio::test]
async fn retrieval_failure_appends_the_generic_reply() {
    let pipeline = build_pipeline(
        Arc::new(MockEmbeddings::new()),
        Arc::new(MockVectorStore::failing()),
        Arc::new(MockGeneration::new("unused")),
    );

    let message = pipeline.answer("question").await.unwrap();

    assert_eq!(message.content, GENERIC_ERROR_REPLY);
    assert!(!pipeline.session().is_busy());
}

#[tokio::test]
async fn generation_failure_appends_the_generic_reply() {
    let llm = Arc::new(MockGeneration::failing());
    let pipeline = build_pipeline(
        Arc::new(MockEmbeddings::new()),
        Arc::new(MockVectorStore::with_passages(&[("context", 0.7)])),
        llm.clone(),
    );

    let message = pipeline.answer("question").await.unwrap();

    assert_eq!(message.content, GENERIC_ERROR_REPLY);
    assert!(!pipeline.session().is_busy());
    // the failure happened after the prompt was built and sent
    assert_eq!(llm.prompts().len(), 1);
}

#[tokio::test]
async fn gate_is_reusable_across_sequential_cycles() {
    let pipeline = build_pipeline(
        Arc::new(MockEmbeddings::new()),
        Arc::new(MockVectorStore::empty()),
        Arc::new(MockGeneration::new("answer")),
    );

    let before = pipeline.session().len();
    assert!(pipeline.answer("first").await.is_some());
    assert!(pipeline.answer("second").await.is_some());

    assert_eq!(pipeline.session().len(), before + 2);
    assert!(!pipeline.session().is_busy());
    assert!(pipeline.session().try_begin());
}
