use veneer_core::prelude::*;
use veneer_presenter::{PresenterConfig, PresenterHook, ViewModel, presenter_factory};

struct PetStore {
    products: Signal<Vec<String>>,
    loading: Signal<bool>,
}

impl PetStore {
    fn finish_loading(&self) {
        self.products
            .update(|p| p.extend(["Cats", "Dogs", "Crocodiles"].map(String::from)));
        self.loading.set(false);
    }
}

fn use_pet_store() -> PresenterHook<PetStore> {
    presenter_factory(|_: (), _: ()| {
        let products = signal(Vec::<String>::new());
        let loading = signal(true);

        let view_model = Derived::new({
            let (products, loading) = (products.clone(), loading.clone());
            move || {
                let headline = if loading.get() {
                    "Finding available pets for sale"
                } else {
                    "Welcome to my pet store"
                };
                ViewModel::new()
                    .with("headline", headline.to_string())
                    .with("pets", products.get())
                    .with("show_skeleton_loader", loading.get())
            }
        });

        Ok(
            PresenterConfig::new(PetStore { products, loading }, view_model)
                .on_created(|| log::info!("pet store presenter created"))
                .on_destroy(|| log::info!("pet store presenter destroyed")),
        )
    })
}

fn render(vm: &ViewModel) {
    let headline = vm.get::<String>("headline").cloned().unwrap_or_default();
    if vm.get::<bool>("show_skeleton_loader").copied().unwrap_or(false) {
        println!("{headline} ...");
    } else {
        let pets = vm.get::<Vec<String>>("pets").cloned().unwrap_or_default();
        println!("{headline}: {}", pets.join(", "));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let use_presenter = use_pet_store();
    let (comp, out) = Composition::mount(|| use_presenter.call((), ()));
    let out = out?;

    render(&out.view_model.value());

    if let Some(store) = out.presenter.state() {
        store.finish_loading();
    }
    render(&out.view_model.value());

    comp.unmount();
    Ok(())
}
