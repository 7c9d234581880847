#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use veneer_core::{Composition, Derived, signal, with_error_boundary};

    use crate::error::PresenterError;
    use crate::factory::{PresenterHook, presenter_factory};
    use crate::types::PresenterConfig;
    use crate::view_model::ViewModel;

    // -- pet-store harness ---------------------------------------------------

    #[derive(Default)]
    struct PetStore {
        counter: Cell<i32>,
    }

    fn actual_view_model() -> ViewModel {
        ViewModel::new()
            .with("greeting", "Welcome to my pet store".to_string())
            .with(
                "pets",
                vec![
                    "Cats".to_string(),
                    "Dogs".to_string(),
                    "Crocodiles".to_string(),
                ],
            )
            .with("is_products_loading", false)
    }

    fn mocked_view_model() -> ViewModel {
        ViewModel::new()
            .with("greeting", "Finding available pets for sale...".to_string())
            .with("pets", Vec::<String>::new())
            .with("is_products_loading", true)
    }

    fn pet_store_hook() -> PresenterHook<PetStore> {
        presenter_factory(|_: (), _: ()| {
            Ok(PresenterConfig::new(
                PetStore::default(),
                Derived::new(actual_view_model),
            ))
        })
    }

    fn lifecycle_hook() -> (PresenterHook<()>, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let created = Rc::new(Cell::new(0));
        let destroyed = Rc::new(Cell::new(0));
        let hook = presenter_factory({
            let (created, destroyed) = (created.clone(), destroyed.clone());
            move |_: (), _: ()| {
                let (created, destroyed) = (created.clone(), destroyed.clone());
                Ok(PresenterConfig::new((), Derived::new(ViewModel::new))
                    .on_created(move || created.set(created.get() + 1))
                    .on_destroy(move || destroyed.set(destroyed.get() + 1)))
            }
        });
        (hook, created, destroyed)
    }

    // -- factory behavior ----------------------------------------------------

    #[test]
    fn runs_factory_callback_only_when_hook_is_called() {
        let calls = Rc::new(Cell::new(0));
        let hook = presenter_factory({
            let calls = calls.clone();
            move |_: (), _: ()| {
                calls.set(calls.get() + 1);
                Ok(PresenterConfig::new((), Derived::new(ViewModel::new)))
            }
        });

        assert_eq!(calls.get(), 0);

        hook.call((), ()).unwrap();
        assert_eq!(calls.get(), 1);

        hook.call((), ()).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn forwards_props_and_view_to_the_factory_callback() {
        let hook = presenter_factory(|props: i32, view: &'static str| {
            Ok(PresenterConfig::new(
                (props, view),
                Derived::new(ViewModel::new),
            ))
        });

        let out = hook.call(7, "detail").unwrap();
        assert_eq!(out.presenter.state(), Some(&(7, "detail")));
    }

    #[test]
    fn invokes_on_created_once_per_resolution() {
        let (hook, created, _) = lifecycle_hook();

        assert_eq!(created.get(), 0);
        hook.call((), ()).unwrap();
        assert_eq!(created.get(), 1);
        hook.call((), ()).unwrap();
        assert_eq!(created.get(), 2);
    }

    #[test]
    fn skips_on_created_when_validation_fails() {
        let created = Rc::new(Cell::new(0));
        let hook = presenter_factory({
            let created = created.clone();
            move |_: (), _: ()| {
                let created = created.clone();
                Ok(
                    PresenterConfig::new((), signal(ViewModel::new()))
                        .on_created(move || created.set(created.get() + 1)),
                )
            }
        });

        assert!(hook.call((), ()).is_err());
        assert_eq!(created.get(), 0);
    }

    #[test]
    fn invokes_on_destroy_when_the_composition_unmounts() {
        let (hook, _, destroyed) = lifecycle_hook();

        let (comp, out) = Composition::mount(|| hook.call((), ()));
        out.unwrap();

        assert_eq!(destroyed.get(), 0);
        comp.unmount();
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn never_invokes_on_destroy_without_a_scope() {
        let (hook, _, destroyed) = lifecycle_hook();

        hook.call((), ()).unwrap();
        assert_eq!(destroyed.get(), 0);
    }

    #[test]
    fn rejects_a_mutable_signal_view_model() {
        let hook = presenter_factory(|_: (), _: ()| {
            Ok(PresenterConfig::new((), signal(ViewModel::new())))
        });

        let err = hook.call((), ()).unwrap_err();
        assert!(matches!(
            err,
            PresenterError::ViewModelNotDerived {
                found: "mutable signal"
            }
        ));
        assert!(err.to_string().contains("must be a derived value"));
    }

    #[test]
    fn rejects_a_plain_view_model() {
        let hook =
            presenter_factory(|_: (), _: ()| Ok(PresenterConfig::new((), ViewModel::new())));

        let err = hook.call((), ()).unwrap_err();
        assert!(matches!(
            err,
            PresenterError::ViewModelNotDerived {
                found: "plain value"
            }
        ));
    }

    #[test]
    fn output_view_model_is_the_presenters_view_model() {
        let hook = pet_store_hook();

        let out = hook.call((), ()).unwrap();
        assert!(Derived::ptr_eq(&out.view_model, &out.presenter.view_model()));
        assert_eq!(
            out.view_model.value().get::<String>("greeting"),
            Some(&"Welcome to my pet store".to_string())
        );
    }

    #[test]
    fn teardown_clears_the_cached_instance() {
        let hook = pet_store_hook();

        let (comp, out) = Composition::mount(|| hook.call((), ()));
        out.unwrap();
        comp.unmount();

        assert!(matches!(
            hook.spy(),
            Err(PresenterError::NoPresenterInstance)
        ));
    }

    #[test]
    fn teardown_of_a_superseded_instance_keeps_the_newer_cache_entry() {
        let hook = pet_store_hook();

        let (comp1, first) = Composition::mount(|| hook.call((), ()));
        let first = first.unwrap();
        let (comp2, second) = Composition::mount(|| hook.call((), ()));
        let second = second.unwrap();

        // disposing the older instance must not clobber the newer one
        comp1.unmount();

        let spied = hook.spy().unwrap();
        assert!(spied.presenter.ptr_eq(&second.presenter));
        assert!(!spied.presenter.ptr_eq(&first.presenter));

        comp2.unmount();
    }

    #[test]
    fn reset_spy_is_idempotent() {
        let hook = pet_store_hook();

        hook.reset_spy();
        hook.reset_spy();

        hook.call((), ()).unwrap();
        hook.reset_spy();
        assert!(matches!(
            hook.spy(),
            Err(PresenterError::NoPresenterInstance)
        ));
    }

    // -- presenter spies -----------------------------------------------------

    #[test]
    fn allows_one_spy_per_presenter_instance() {
        let hook = pet_store_hook();

        hook.call((), ()).unwrap();
        assert!(hook.spy().is_ok());
        assert!(matches!(
            hook.spy(),
            Err(PresenterError::NoPresenterInstance)
        ));

        for _ in 0..3 {
            hook.call((), ()).unwrap();
            assert!(hook.spy().is_ok());
        }
    }

    #[test]
    fn spying_before_any_resolution_fails() {
        let hook = pet_store_hook();
        let err = hook.spy().unwrap_err();
        assert!(err.to_string().contains("before calling spy()"));
    }

    #[test]
    fn spies_on_the_latest_resolved_instance() {
        let hook = pet_store_hook();

        let first = hook.call((), ()).unwrap();
        let spied = hook.spy().unwrap();
        assert!(spied.presenter.ptr_eq(&first.presenter));

        // a new resolution is a different instance from the consumed spy
        let second = hook.call((), ()).unwrap();
        assert!(!second.presenter.ptr_eq(&spied.presenter));

        // state on the old instance does not leak into the new one
        spied.presenter.state().unwrap().counter.set(9);
        assert_eq!(second.presenter.state().unwrap().counter.get(), 0);
    }

    #[test]
    fn spy_shares_state_with_the_resolved_instance() {
        let hook = pet_store_hook();

        let resolved = hook.call((), ()).unwrap();
        let spied = hook.spy().unwrap();

        resolved.presenter.state().unwrap().counter.set(1);
        assert_eq!(spied.presenter.state().unwrap().counter.get(), 1);
        assert!(Derived::ptr_eq(&spied.view_model, &resolved.view_model));
    }

    #[test]
    fn hooks_from_separate_factory_calls_are_isolated() {
        let store = pet_store_hook();
        let other = presenter_factory(|_: (), _: ()| {
            Ok(PresenterConfig::new((), Derived::new(ViewModel::new)))
        });

        store.call((), ()).unwrap();
        other.call((), ()).unwrap();

        assert!(store.spy().is_ok());
        assert!(other.spy().is_ok());

        // mocking one hook never affects the other
        other.mock_view_model(|vm| vm.clone());
        let out = store.call((), ()).unwrap();
        assert_eq!(
            out.view_model.value().get::<String>("greeting"),
            Some(&"Welcome to my pet store".to_string())
        );
    }

    #[test]
    fn spying_on_a_mocked_instance_sees_the_override() {
        let hook = pet_store_hook();

        hook.mock_view_model(|_vm| mocked_view_model());

        let resolved = hook.call((), ()).unwrap();
        let spied = hook.spy().unwrap();

        // the spied instance is the one the call returned, override and all
        assert!(spied.presenter.ptr_eq(&resolved.presenter));
        assert!(Derived::ptr_eq(&spied.view_model, &resolved.view_model));
        assert_eq!(
            spied.view_model.value().get::<String>("greeting"),
            Some(&"Finding available pets for sale...".to_string())
        );
        assert_eq!(
            spied.view_model.value().get::<bool>("is_products_loading"),
            Some(&true)
        );
    }

    #[test]
    fn presenter_output_is_debug_for_test_assertions() {
        let hook = pet_store_hook();

        let out = hook.call((), ()).unwrap();
        let rendered = format!("{out:?}");
        assert!(rendered.contains("PresenterOutput"));
        assert!(rendered.contains("fallback: false"));
    }

    // -- view model mocking --------------------------------------------------

    #[test]
    fn returns_the_mocked_view_model() {
        let hook = pet_store_hook();

        hook.mock_view_model(|_vm| mocked_view_model());

        let out = hook.call((), ()).unwrap();
        let vm = out.view_model.value();
        assert_eq!(
            vm.get::<String>("greeting"),
            Some(&"Finding available pets for sale...".to_string())
        );
        assert_eq!(vm.get::<Vec<String>>("pets").map(Vec::len), Some(0));
        assert_eq!(vm.get::<bool>("is_products_loading"), Some(&true));
    }

    #[test]
    fn mocks_the_next_resolved_instance_only() {
        let hook = pet_store_hook();

        hook.mock_view_model(|_vm| mocked_view_model());

        let mocked = hook.call((), ()).unwrap();
        assert_eq!(
            mocked.view_model.value().get::<bool>("is_products_loading"),
            Some(&true)
        );

        let real = hook.call((), ()).unwrap();
        assert_eq!(
            real.view_model.value().get::<bool>("is_products_loading"),
            Some(&false)
        );
        assert_eq!(
            real.view_model.value().get::<Vec<String>>("pets").map(Vec::len),
            Some(3)
        );
    }

    #[test]
    fn last_registered_override_wins() {
        let hook = pet_store_hook();

        hook.mock_view_model(|_vm| mocked_view_model());
        hook.mock_view_model(|vm| {
            let mut vm = vm.clone();
            vm.set("greeting", "Closed for the holidays".to_string());
            vm
        });

        let out = hook.call((), ()).unwrap();
        assert_eq!(
            out.view_model.value().get::<String>("greeting"),
            Some(&"Closed for the holidays".to_string())
        );
    }

    #[test]
    fn rejects_overrides_with_unknown_fields() {
        let hook = pet_store_hook();

        hook.mock_view_model(|vm| {
            let mut vm = vm.clone();
            vm.set("does_not_exist_in_actual_view_model", true);
            vm
        });

        let err = hook.call((), ()).unwrap_err();
        assert!(matches!(err, PresenterError::OverrideUnknownFields { .. }));
        assert!(err.to_string().contains("does_not_exist_in_actual_view_model"));
        assert!(err.to_string().contains("do not exist in the actual view model"));
    }

    #[test]
    fn rejects_overrides_with_missing_fields() {
        let hook = pet_store_hook();

        // everything but is_products_loading
        hook.mock_view_model(|_vm| {
            ViewModel::new()
                .with("greeting", "hi".to_string())
                .with("pets", Vec::<String>::new())
        });

        let err = hook.call((), ()).unwrap_err();
        assert!(matches!(err, PresenterError::OverrideMissingFields { .. }));
        assert!(err.to_string().contains("is_products_loading"));
        assert!(err.to_string().contains("missing from the mocked view model"));
    }

    #[test]
    fn unknown_fields_are_reported_before_missing_ones() {
        let hook = pet_store_hook();

        // wrong on both counts: one unknown field, all real fields missing
        hook.mock_view_model(|_vm| ViewModel::new().with("totally_different", 1));

        let err = hook.call((), ()).unwrap_err();
        assert!(matches!(err, PresenterError::OverrideUnknownFields { .. }));
    }

    #[test]
    fn offending_fields_are_listed_in_order() {
        let hook = pet_store_hook();

        hook.mock_view_model(|vm| {
            let mut vm = vm.clone();
            vm.set("z_extra", 1);
            vm.set("a_extra", 1);
            vm
        });

        let err = hook.call((), ()).unwrap_err();
        assert!(err.to_string().contains("[a_extra, z_extra]"));
    }

    #[test]
    fn a_failing_override_is_still_consumed() {
        let hook = pet_store_hook();

        hook.mock_view_model(|vm| {
            let mut vm = vm.clone();
            vm.set("bogus", ());
            vm
        });
        assert!(hook.call((), ()).is_err());

        // the next resolution runs against the real view model again
        let out = hook.call((), ()).unwrap();
        assert_eq!(
            out.view_model.value().get::<bool>("is_products_loading"),
            Some(&false)
        );
    }

    // -- fault isolation -----------------------------------------------------

    #[test]
    fn factory_errors_outside_a_scope_propagate_synchronously() {
        let hook: PresenterHook<()> = presenter_factory(|_: (), _: ()| {
            Err(anyhow::anyhow!("Thrown from inside the presenter"))
        });

        let err = hook.call((), ()).unwrap_err();
        assert!(matches!(err, PresenterError::Factory(_)));
        assert_eq!(err.to_string(), "Thrown from inside the presenter");
    }

    #[test]
    fn factory_errors_keep_their_original_value() {
        #[derive(Debug)]
        struct Broken;
        impl std::fmt::Display for Broken {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "presenter exploded")
            }
        }
        impl std::error::Error for Broken {}

        let hook: PresenterHook<()> =
            presenter_factory(|_: (), _: ()| Err(anyhow::Error::new(Broken)));

        match hook.call((), ()).unwrap_err() {
            PresenterError::Factory(e) => assert!(e.downcast_ref::<Broken>().is_some()),
            other => panic!("expected a factory error, got: {other}"),
        }
    }

    #[test]
    fn factory_errors_inside_a_mount_fall_back_instead_of_failing_the_render() {
        let hook: PresenterHook<()> = presenter_factory(|_: (), _: ()| {
            Err(anyhow::anyhow!("Thrown from inside the presenter"))
        });

        let seen = Rc::new(RefCell::new(Vec::new()));
        let comp = with_error_boundary(
            {
                let seen = seen.clone();
                move |err: anyhow::Error| seen.borrow_mut().push(err.to_string())
            },
            || {
                let (comp, _) = Composition::mount(|| {
                    let out = hook.call((), ()).unwrap();

                    // the broken render still resolves: empty presenter,
                    // empty view model, field reads give None
                    assert!(out.presenter.state().is_none());
                    assert!(out.view_model.value().is_empty());
                    assert_eq!(out.view_model.value().get::<bool>("some_property"), None);

                    // the error is held back until the mount completes
                    assert!(seen.borrow().is_empty());
                });
                comp
            },
        );

        assert_eq!(*seen.borrow(), vec!["Thrown from inside the presenter"]);
        comp.unmount();
    }

    #[test]
    fn a_fallback_instance_is_never_cached() {
        let hook: PresenterHook<()> =
            presenter_factory(|_: (), _: ()| Err(anyhow::anyhow!("boom")));

        let (comp, _) = Composition::mount(|| {
            hook.call((), ()).unwrap();
        });
        comp.unmount();

        assert!(matches!(
            hook.spy(),
            Err(PresenterError::NoPresenterInstance)
        ));
    }
}
