use crate::graph;

pub fn validate_module<'graph>(m: &'graph graph::Module<'graph>) {
    for register in m.registers.borrow().iter() {
        match register.data {
            graph::SignalData::Reg { data } => {
                if data.next.borrow().is_none() {
                    panic!("Cannot generate code for module \"{}\" because module \"{}\" contains a register called \"{}\" which is not driven.", m.name, m.name, data.name);
                }
            }
            _ => unreachable!(),
        }
    }
}
