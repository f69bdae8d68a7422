use ibc_harness::deploy::deploy_stack;
use ibc_harness::{ChainError, HarnessError};
use ibc_harness_testkit::chain::{MockChain, MockContract};
use ibc_harness_testkit::fixtures::dummy_signer;
use ibc_harness_types::plan::{DeploymentPlan, LogicModule, HANDLER_ARTIFACT};
use rstest::rstest;

#[rstest]
#[case(DeploymentPlan::MINIMAL, 5)]
#[case(DeploymentPlan::EXTENDED, 7)]
fn handler_receives_logic_modules_in_plan_order(
    #[case] plan: DeploymentPlan,
    #[case] expected_modules: usize,
) {
    let mut chain = MockChain::default();

    let handler = deploy_stack(&mut chain, &plan, &dummy_signer()).unwrap();

    let deployments = chain.deployments();
    assert_eq!(deployments.len(), expected_modules + 1);

    let logic_deployments = &deployments[..expected_modules];
    for (module, deployment) in plan.iter().zip(logic_deployments) {
        assert_eq!(deployment.name, module.artifact_name());
        assert!(deployment.constructor_args.is_empty());
    }

    let handler_deployment = deployments.last().unwrap();
    assert_eq!(handler_deployment.name, HANDLER_ARTIFACT);
    assert_eq!(handler_deployment.address, Some(handler.address()));

    let logic_addresses: Vec<_> = logic_deployments
        .iter()
        .map(|d| d.address.unwrap())
        .collect();
    assert_eq!(handler_deployment.constructor_args, logic_addresses);
    assert_eq!(handler.logic_addresses(), logic_addresses.as_slice());
    assert_eq!(handler.logic_count(), expected_modules);
    assert_eq!(handler.plan(), plan);
}

#[test_log::test]
fn logic_address_resolves_by_slot() {
    let mut chain = MockChain::default();

    let handler = deploy_stack(&mut chain, &DeploymentPlan::MINIMAL, &dummy_signer()).unwrap();

    for module in DeploymentPlan::MINIMAL.iter() {
        let address = handler.logic_address(module).unwrap();
        assert_eq!(chain.contract(&address), Some(&MockContract::Logic(module)));
    }
    assert_eq!(
        handler.logic_address(LogicModule::ChannelUpgradeInitTryAck),
        None
    );
}

#[test_log::test]
fn logic_failure_stops_before_handler() {
    let mut chain = MockChain::default();
    let failing = LogicModule::ChannelHandshake.artifact_name();
    chain.fail_deployment(
        failing,
        ChainError::Reverted {
            reason: "out of gas".to_string(),
        },
    );

    let err = deploy_stack(&mut chain, &DeploymentPlan::MINIMAL, &dummy_signer()).unwrap_err();

    match err {
        HarnessError::DeploymentFailure { module, cause } => {
            assert_eq!(module, failing);
            assert!(cause.is_revert());
        }
        other => panic!("unexpected error: {other}"),
    }

    let names: Vec<_> = chain.deployments().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            LogicModule::Client.artifact_name(),
            LogicModule::ConnectionSelfStateNoValidation.artifact_name(),
            LogicModule::ChannelHandshake.artifact_name(),
        ]
    );
    assert!(!names.contains(&HANDLER_ARTIFACT));
}

#[test_log::test]
fn handler_failure_is_reported_with_its_name() {
    let mut chain = MockChain::default();
    chain.fail_deployment(
        HANDLER_ARTIFACT,
        ChainError::Unconfirmed {
            tx_hash: Default::default(),
            attempts: 3,
        },
    );

    let err = deploy_stack(&mut chain, &DeploymentPlan::EXTENDED, &dummy_signer()).unwrap_err();

    assert!(matches!(
        err,
        HarnessError::DeploymentFailure { ref module, cause: ChainError::Unconfirmed { .. } }
            if module == HANDLER_ARTIFACT
    ));
    assert_eq!(chain.deployments().len(), 8);
}
