use idea_evaluation::config::Config;
use idea_evaluation::models::{EvaluationPayload, Idea, Outbound, Review, RoundVerdict};
use idea_evaluation::orchestrator::router::{CHECK, CLEAR, EVALUATE};
use idea_evaluation::CommandRouter;
use serde_json::json;

fn router() -> CommandRouter {
    CommandRouter::new(&Config::without_latency())
}

/// 用句号把文本补足到 50 个字符
fn padded(text: &str) -> String {
    let mut s = text.to_string();
    while s.chars().count() < 50 {
        s.push('。');
    }
    s
}

#[test]
fn test_federated_privacy_idea_gets_both_method_issues() {
    tokio_test::block_on(async {
        let router = router();
        let idea = Idea {
            id: Some("fl-1".to_string()),
            title: Some("联邦学习隐私保护".to_string()),
            methodology: padded("研究步骤：各参与方在本地更新，再汇总结果"),
            experimental_setup: padded(
                "使用医疗数据集，硬件为GPU，评估指标为准确率，与基线对比，包含消融实验，说明超参数，并配置10个节点",
            ),
            ..Default::default()
        };

        let dispatch = router
            .dispatch(CHECK, "leader", json!({ "ideas": [idea], "round": 1 }))
            .await;
        assert!(dispatch.response.success);

        let verdict: RoundVerdict = serde_json::from_value(dispatch.response.data).unwrap();
        assert!(!verdict.all_passed);
        assert_eq!(
            verdict.ideas[0].method_feedback,
            "联邦学习的通信和聚合机制未说明；隐私保护机制未详细说明"
        );
        assert!(!verdict.ideas[0].needs_experiment_improvement);
        assert_eq!(verdict.needs_method_improvement.len(), 1);
        assert!(verdict.needs_another_round(2));
        assert!(!verdict.needs_another_round(1));

        match &dispatch.outbound[0] {
            Outbound::ChannelPost { text, .. } => {
                assert!(text.starts_with("🔍 完善Agent检查结果（第1轮）："));
                assert!(text.contains("⚠️ 需要改进 联邦学习隐私保护"));
            }
            other => panic!("unexpected outbound: {:?}", other),
        }
    });
}

#[test]
fn test_empty_evaluation_is_rejected() {
    tokio_test::block_on(async {
        let dispatch = router()
            .dispatch(EVALUATE, "leader", json!({ "ideas": [], "top_k": 3 }))
            .await;
        assert!(!dispatch.response.success);
        assert_eq!(dispatch.response.error_code(), Some("empty_ideas_list"));
        assert!(dispatch.outbound.is_empty());
    });
}

#[tokio::test]
async fn test_ranking_follows_review_scores() {
    let ideas = vec![
        Idea {
            id: Some("low".to_string()),
            title: Some("Low".to_string()),
            reviews: vec![Review::new("Technical", 2.0)],
            ..Default::default()
        },
        Idea {
            id: Some("high".to_string()),
            title: Some("High".to_string()),
            reviews: vec![Review::new("technical", 10.0), Review::new("IMPACT", 10.0)],
            ..Default::default()
        },
        Idea {
            id: Some("mid".to_string()),
            title: Some("Mid".to_string()),
            ..Default::default()
        },
    ];

    let dispatch = router()
        .dispatch(EVALUATE, "leader", json!({ "ideas": ideas, "top_k": 2 }))
        .await;
    let payload: EvaluationPayload = serde_json::from_value(dispatch.response.data).unwrap();

    assert_eq!(payload.total_evaluated, 3);
    assert_eq!(payload.top_k_returned, 2);
    let order: Vec<&str> = payload
        .scored_ideas
        .iter()
        .map(|s| s.evaluation.idea_id.as_str())
        .collect();
    assert_eq!(order, vec!["high", "mid"]);
    assert!(payload.scored_ideas[0].evaluation.total_score > payload.scored_ideas[1].evaluation.total_score);
}

#[tokio::test]
async fn test_clear_behaves_like_fresh_session() {
    let ideas = json!({
        "ideas": [
            { "id": "a", "title": "跨模态检索" },
            { "id": "b", "title": "通用研究" }
        ],
        "round": 1
    });

    let used = router();
    used.dispatch(EVALUATE, "leader", ideas.clone()).await;
    used.dispatch(CHECK, "leader", ideas.clone()).await;
    let cleared = used.dispatch(CLEAR, "leader", json!({})).await;
    assert_eq!(cleared.response.data, json!({ "status": "buffers_cleared" }));

    let fresh = router();
    let after_clear = used.dispatch(CHECK, "leader", ideas.clone()).await;
    let from_fresh = fresh.dispatch(CHECK, "leader", ideas.clone()).await;
    assert_eq!(after_clear.response, from_fresh.response);

    let after_clear = used.dispatch(EVALUATE, "leader", ideas.clone()).await;
    let from_fresh = fresh.dispatch(EVALUATE, "leader", ideas).await;
    assert_eq!(after_clear.response, from_fresh.response);
}
