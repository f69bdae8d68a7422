use std::str::FromStr;

use ibc_harness::deploy::{deploy_stack, Handler};
use ibc_harness::stack::MOCK_APP_ARTIFACT;
use ibc_harness::wiring::{bind_port, register_client};
use ibc_harness::{ChainError, HarnessError};
use ibc_harness_testkit::chain::{MockChain, MockContract};
use ibc_harness_testkit::fixtures::dummy_signer;
use ibc_harness_types::identifiers::{ClientType, ClientVariant, PortId};
use ibc_harness_types::plan::DeploymentPlan;
use rstest::{fixture, rstest};

struct Fixture {
    chain: MockChain,
    handler: Handler,
}

#[fixture]
fn fixture() -> Fixture {
    let mut chain = MockChain::default();
    let handler = deploy_stack(&mut chain, &DeploymentPlan::MINIMAL, &dummy_signer())
        .expect("mock deployment succeeds");

    Fixture { chain, handler }
}

#[rstest]
fn client_is_deployed_against_handler_and_registered(fixture: Fixture) {
    let Fixture {
        mut chain,
        handler,
    } = fixture;
    let client_type = ClientVariant::Ibft2.client_type();

    let binding = register_client(
        &mut chain,
        &handler,
        &client_type,
        ClientVariant::Ibft2.artifact_name(),
        &dummy_signer(),
    )
    .unwrap();

    assert_eq!(binding.client_type.as_str(), "hb-ibft2");
    assert_eq!(
        chain.contract(&binding.client_address),
        Some(&MockContract::Client {
            name: "IBFT2Client".to_string(),
            handler: handler.address(),
        })
    );

    let deployment = chain.deployments().last().unwrap();
    assert_eq!(deployment.constructor_args, vec![handler.address()]);

    let state = chain.handler(&handler.address()).unwrap();
    assert_eq!(state.client("hb-ibft2"), Some(binding.client_address));
}

#[rstest]
fn duplicate_client_type_is_a_conflict(fixture: Fixture) {
    let Fixture {
        mut chain,
        handler,
    } = fixture;
    let client_type = ClientVariant::Ibft2.client_type();
    let signer = dummy_signer();

    let first = register_client(&mut chain, &handler, &client_type, "IBFT2Client", &signer).unwrap();
    let err =
        register_client(&mut chain, &handler, &client_type, "IBFT2Client", &signer).unwrap_err();

    assert!(matches!(
        err,
        HarnessError::RegistrationConflict { ref client_type } if client_type.as_str() == "hb-ibft2"
    ));

    let state = chain.handler(&handler.address()).unwrap();
    assert_eq!(state.clients.len(), 1);
    assert_eq!(state.client("hb-ibft2"), Some(first.client_address));
}

#[rstest]
fn distinct_client_types_coexist(fixture: Fixture) {
    let Fixture {
        mut chain,
        handler,
    } = fixture;
    let signer = dummy_signer();

    for variant in ClientVariant::ALL {
        register_client(
            &mut chain,
            &handler,
            &variant.client_type(),
            variant.artifact_name(),
            &signer,
        )
        .unwrap();
    }

    let state = chain.handler(&handler.address()).unwrap();
    assert_eq!(state.clients.len(), 2);
    assert!(state.client("hb-ibft2").is_some());
    assert!(state.client("hb-qbft").is_some());
}

#[rstest]
fn custom_client_type_can_reuse_a_client_contract(fixture: Fixture) {
    let Fixture {
        mut chain,
        handler,
    } = fixture;
    let signer = dummy_signer();

    register_client(
        &mut chain,
        &handler,
        &ClientVariant::Ibft2.client_type(),
        "IBFT2Client",
        &signer,
    )
    .unwrap();
    register_client(
        &mut chain,
        &handler,
        &ClientType::from_str("hb-ibft2-staging").unwrap(),
        "IBFT2Client",
        &signer,
    )
    .unwrap();

    assert_eq!(chain.handler(&handler.address()).unwrap().clients.len(), 2);
}

#[rstest]
fn app_is_bound_to_port(fixture: Fixture) {
    let Fixture {
        mut chain,
        handler,
    } = fixture;

    let binding = bind_port(
        &mut chain,
        &handler,
        &PortId::mockapp(),
        MOCK_APP_ARTIFACT,
        &dummy_signer(),
    )
    .unwrap();

    assert_eq!(binding.port_id, PortId::mockapp());
    assert_eq!(
        chain
            .handler(&handler.address())
            .unwrap()
            .port_owner(&PortId::mockapp()),
        Some(binding.app_address)
    );
}

#[rstest]
fn duplicate_port_is_rejected(fixture: Fixture) {
    let Fixture {
        mut chain,
        handler,
    } = fixture;
    let signer = dummy_signer();

    let first = bind_port(&mut chain, &handler, &PortId::mockapp(), MOCK_APP_ARTIFACT, &signer)
        .unwrap();
    let err = bind_port(&mut chain, &handler, &PortId::mockapp(), MOCK_APP_ARTIFACT, &signer)
        .unwrap_err();

    assert!(matches!(
        err,
        HarnessError::PortAlreadyBound { ref port_id } if *port_id == PortId::mockapp()
    ));
    assert_eq!(
        chain
            .handler(&handler.address())
            .unwrap()
            .port_owner(&PortId::mockapp()),
        Some(first.app_address)
    );
}

#[rstest]
fn distinct_ports_coexist(fixture: Fixture) {
    let Fixture {
        mut chain,
        handler,
    } = fixture;
    let signer = dummy_signer();
    let other_port = PortId::from_str("mockapp2").unwrap();

    let first = bind_port(&mut chain, &handler, &PortId::mockapp(), MOCK_APP_ARTIFACT, &signer)
        .unwrap();
    let second = bind_port(&mut chain, &handler, &other_port, MOCK_APP_ARTIFACT, &signer).unwrap();

    assert_ne!(first.app_address, second.app_address);
    assert_eq!(chain.handler(&handler.address()).unwrap().ports.len(), 2);
}

#[rstest]
fn client_deployment_failure_is_a_deployment_failure(fixture: Fixture) {
    let Fixture {
        mut chain,
        handler,
    } = fixture;
    chain.fail_deployment(
        "QBFTClient",
        ChainError::Transport {
            description: "connection reset".to_string(),
        },
    );

    let err = register_client(
        &mut chain,
        &handler,
        &ClientVariant::Qbft.client_type(),
        "QBFTClient",
        &dummy_signer(),
    )
    .unwrap_err();

    assert!(matches!(err, HarnessError::DeploymentFailure { ref module, .. } if module == "QBFTClient"));
    assert!(chain.handler(&handler.address()).unwrap().clients.is_empty());
}

#[rstest]
fn non_revert_failure_is_a_chain_error(fixture: Fixture) {
    let Fixture {
        mut chain,
        handler,
    } = fixture;
    chain.fail_calls(ChainError::Unconfirmed {
        tx_hash: Default::default(),
        attempts: 120,
    });

    let err = register_client(
        &mut chain,
        &handler,
        &ClientVariant::Ibft2.client_type(),
        "IBFT2Client",
        &dummy_signer(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        HarnessError::Chain(ChainError::Unconfirmed { attempts: 120, .. })
    ));
}
