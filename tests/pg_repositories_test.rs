mod helpers;

use uuid::Uuid;

use concierge::application::ports::{
    ConversationRepository, CreditError, CreditLedger, RepositoryError,
};
use concierge::domain::{Conversation, ConversationId, Message, MessageRole, UserId};

use helpers::{TEST_DEFAULT_CREDITS, TestPostgres};

fn test_user() -> UserId {
    UserId::from_uuid(Uuid::new_v4())
}

#[tokio::test]
async fn given_new_conversation_when_creating_then_find_latest_returns_it() {
    let test_pg = TestPostgres::new().await;
    let user = test_user();

    let conversation = Conversation::new(user, Some("AI Support".to_string()));
    test_pg
        .conversation_repository
        .create_conversation(&conversation)
        .await
        .expect("Failed to create conversation");

    let found = test_pg
        .conversation_repository
        .find_latest_conversation(user)
        .await
        .expect("Failed to query latest conversation")
        .expect("Conversation not found");

    assert_eq!(found.id, conversation.id);
    assert_eq!(found.title, conversation.title);
    assert_eq!(found.user_id, user);
}

#[tokio::test]
async fn given_two_conversations_when_finding_latest_then_most_recent_wins() {
    let test_pg = TestPostgres::new().await;
    let user = test_user();

    let older = Conversation::new(user, Some("first".to_string()));
    test_pg
        .conversation_repository
        .create_conversation(&older)
        .await
        .expect("Failed to create first conversation");

    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    let newer = Conversation::new(user, Some("second".to_string()));
    test_pg
        .conversation_repository
        .create_conversation(&newer)
        .await
        .expect("Failed to create second conversation");

    let found = test_pg
        .conversation_repository
        .find_latest_conversation(user)
        .await
        .expect("Failed to query latest conversation")
        .expect("Conversation not found");

    assert_eq!(found.id, newer.id);
}

#[tokio::test]
async fn given_user_without_conversations_when_finding_latest_then_returns_none() {
    let test_pg = TestPostgres::new().await;

    let found = test_pg
        .conversation_repository
        .find_latest_conversation(test_user())
        .await
        .expect("Failed to query latest conversation");

    assert!(found.is_none());
}

#[tokio::test]
async fn given_conversation_when_appending_messages_then_listed_in_creation_order() {
    let test_pg = TestPostgres::new().await;
    let user = test_user();

    let conversation = Conversation::new(user, None);
    test_pg
        .conversation_repository
        .create_conversation(&conversation)
        .await
        .expect("Failed to create conversation");

    let msg1 = Message::new(conversation.id, MessageRole::User, "Hello".to_string());
    let msg2 = Message::new(
        conversation.id,
        MessageRole::Assistant,
        "Hi there!".to_string(),
    );

    test_pg
        .conversation_repository
        .append_message(&msg1)
        .await
        .expect("Failed to append first message");

    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    test_pg
        .conversation_repository
        .append_message(&msg2)
        .await
        .expect("Failed to append second message");

    let messages = test_pg
        .conversation_repository
        .list_messages(conversation.id, 10)
        .await
        .expect("Failed to list messages");

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "Hello");
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[1].content, "Hi there!");
    assert_eq!(messages[1].role, MessageRole::Assistant);
}

#[tokio::test]
async fn given_more_messages_than_limit_when_listing_then_returns_most_recent() {
    let test_pg = TestPostgres::new().await;
    let user = test_user();

    let conversation = Conversation::new(user, None);
    test_pg
        .conversation_repository
        .create_conversation(&conversation)
        .await
        .expect("Failed to create conversation");

    for i in 0..5 {
        let msg = Message::new(conversation.id, MessageRole::User, format!("Message {}", i));
        test_pg
            .conversation_repository
            .append_message(&msg)
            .await
            .expect("Failed to append message");
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }

    let messages = test_pg
        .conversation_repository
        .list_messages(conversation.id, 3)
        .await
        .expect("Failed to list messages");

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].content, "Message 2");
    assert_eq!(messages[1].content, "Message 3");
    assert_eq!(messages[2].content, "Message 4");
}

#[tokio::test]
async fn given_no_intervening_writes_when_listing_twice_then_sequences_are_identical() {
    let test_pg = TestPostgres::new().await;
    let user = test_user();

    let conversation = Conversation::new(user, None);
    test_pg
        .conversation_repository
        .create_conversation(&conversation)
        .await
        .expect("Failed to create conversation");

    for i in 0..4 {
        let msg = Message::new(conversation.id, MessageRole::User, format!("turn {}", i));
        test_pg
            .conversation_repository
            .append_message(&msg)
            .await
            .expect("Failed to append message");
    }

    let first = test_pg
        .conversation_repository
        .list_messages(conversation.id, 10)
        .await
        .expect("Failed to list messages");
    let second = test_pg
        .conversation_repository
        .list_messages(conversation.id, 10)
        .await
        .expect("Failed to list messages");

    let ids = |messages: &[Message]| messages.iter().map(|m| m.id).collect::<Vec<_>>();
    assert_eq!(ids(&first), ids(&second));
}

#[tokio::test]
async fn given_dangling_conversation_when_appending_then_constraint_violation() {
    let test_pg = TestPostgres::new().await;

    let dangling = ConversationId::new();
    let msg = Message::new(dangling, MessageRole::User, "Hello".to_string());

    let result = test_pg.conversation_repository.append_message(&msg).await;

    assert!(matches!(
        result,
        Err(RepositoryError::ConstraintViolation(_))
    ));
}

#[tokio::test]
async fn given_first_access_when_reading_balance_then_account_created_with_default() {
    let test_pg = TestPostgres::new().await;
    let user = test_user();

    let account = test_pg
        .credit_ledger
        .account(user)
        .await
        .expect("Failed to read account");

    assert_eq!(account.user_id, user);
    assert_eq!(account.credits_remaining, TEST_DEFAULT_CREDITS);
}

#[tokio::test]
async fn given_positive_balance_when_debiting_then_balance_decreases_by_one() {
    let test_pg = TestPostgres::new().await;
    let user = test_user();

    let remaining = test_pg
        .credit_ledger
        .debit(user)
        .await
        .expect("Failed to debit");

    assert_eq!(remaining, TEST_DEFAULT_CREDITS - 1);
    assert_eq!(
        test_pg
            .credit_ledger
            .account(user)
            .await
            .unwrap()
            .credits_remaining,
        TEST_DEFAULT_CREDITS - 1
    );
}

#[tokio::test]
async fn given_exhausted_balance_when_debiting_then_insufficient_and_never_negative() {
    let test_pg = TestPostgres::new().await;
    let user = test_user();

    for _ in 0..TEST_DEFAULT_CREDITS {
        test_pg
            .credit_ledger
            .debit(user)
            .await
            .expect("Failed to debit");
    }

    let result = test_pg.credit_ledger.debit(user).await;

    assert!(matches!(result, Err(CreditError::Insufficient)));
    assert_eq!(
        test_pg
            .credit_ledger
            .account(user)
            .await
            .unwrap()
            .credits_remaining,
        0
    );
}

#[tokio::test]
async fn given_balance_of_one_when_two_debits_race_then_exactly_one_succeeds() {
    let test_pg = TestPostgres::new().await;
    let user = test_user();

    for _ in 0..(TEST_DEFAULT_CREDITS - 1) {
        test_pg
            .credit_ledger
            .debit(user)
            .await
            .expect("Failed to drain balance");
    }

    let (a, b) = tokio::join!(
        test_pg.credit_ledger.debit(user),
        test_pg.credit_ledger.debit(user)
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|&&ok| ok).count();
    assert_eq!(successes, 1, "the conditional update admits only one debit");
    assert_eq!(
        test_pg
            .credit_ledger
            .account(user)
            .await
            .unwrap()
            .credits_remaining,
        0
    );
}
